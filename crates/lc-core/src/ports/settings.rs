use async_trait::async_trait;

use super::errors::SettingsError;
use crate::settings::model::Settings;

#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> Result<Settings, SettingsError>;
    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}
