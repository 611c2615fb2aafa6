use super::model::*;

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            interface_language: "en".to_string(),
            theme: Theme::Light,
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval_ms: 500,
            max_interval_ms: 2_000,
        }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Google,
            src_lang: "auto".to_string(),
            dest_lang: "vi".to_string(),
            pool_size: 3,
            model_endpoint: None,
            model_timeout_ms: 5_000,
            phrase_table_path: None,
            request_timeout_ms: 10_000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            max_history_items: 500,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            general: GeneralSettings::default(),
            monitor: MonitorSettings::default(),
            translation: TranslationSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}
