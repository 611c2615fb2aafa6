use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lc_core::{
    ports::{SettingsError, SettingsPort},
    settings::model::{Settings, CURRENT_SCHEMA_VERSION},
};
use tokio::fs;
use tracing::{debug, warn};

/// Settings persisted as pretty-printed JSON in a single file.
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                SettingsError::Write(format!("create settings dir {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// Write to a sibling temp file, then rename over the target so a reader
    /// sees either the old or the new content.
    async fn atomic_write(&self, content: &str) -> Result<(), SettingsError> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await.map_err(|e| {
            SettingsError::Write(format!("write temp settings {}: {e}", tmp_path.display()))
        })?;

        // TODO: rename over an existing file is not atomic on every Windows filesystem.
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            SettingsError::Write(format!(
                "rename {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl SettingsPort for FileSettingsRepository {
    /// Missing file ⇒ defaults. Unreadable or malformed file ⇒ error; the
    /// caller decides whether to fall back.
    async fn load(&self) -> Result<Settings, SettingsError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "settings file not found, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(SettingsError::Read(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        };

        let mut settings: Settings = serde_json::from_str(&content)
            .map_err(|e| SettingsError::Malformed(format!("{}: {e}", self.path.display())))?;

        if settings.schema_version > CURRENT_SCHEMA_VERSION {
            warn!(
                found = settings.schema_version,
                supported = CURRENT_SCHEMA_VERSION,
                "settings written by a newer version, unknown fields are ignored"
            );
        } else if settings.schema_version < CURRENT_SCHEMA_VERSION {
            settings.schema_version = CURRENT_SCHEMA_VERSION;
            self.save(&settings).await?;
        }

        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsError::Write(format!("serialize settings: {e}")))?;

        self.atomic_write(&content).await
    }
}
