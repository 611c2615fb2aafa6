use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Interface language code. Also one half of the log key material.
    pub interface_language: String,
    /// Other half of the log key material.
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Whether the clipboard monitor polls at start-up.
    pub enabled: bool,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
}

impl MonitorSettings {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }
}

/// Which translation backend serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Google,
    Mymemory,
    Offline,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Mymemory => "mymemory",
            ProviderKind::Offline => "offline",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "mymemory" => Ok(ProviderKind::Mymemory),
            "offline" => Ok(ProviderKind::Offline),
            other => Err(format!("unknown translation provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub provider: ProviderKind,
    /// `"auto"` enables detection.
    pub src_lang: String,
    pub dest_lang: String,
    /// Upper bound on concurrently running translation jobs.
    pub pool_size: usize,
    /// LibreTranslate-compatible endpoint used by the offline provider.
    pub model_endpoint: Option<String>,
    pub model_timeout_ms: u64,
    /// Extra phrase-table entries merged over the built-in set.
    pub phrase_table_path: Option<String>,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// History keeps at most this many entries, oldest dropped first.
    pub max_history_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub monitor: MonitorSettings,

    #[serde(default)]
    pub translation: TranslationSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
