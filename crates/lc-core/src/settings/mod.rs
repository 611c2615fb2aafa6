pub mod defaults;
pub mod model;

pub use model::{
    GeneralSettings, MonitorSettings, ProviderKind, Settings, StorageSettings, Theme,
    TranslationSettings, CURRENT_SCHEMA_VERSION,
};
