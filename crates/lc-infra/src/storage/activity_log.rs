use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lc_core::ports::{ActivityLogPort, StorageError};
use lc_core::{ActivityLog, FavoriteEntry, HistoryEntry, LogRecord, SecurityLevel};

use super::log_store::EncryptedLogStore;
use crate::security::LineCipher;

/// History and favorites logs kept side by side in one data directory.
pub struct EncryptedActivityLog {
    store: EncryptedLogStore,
    data_dir: PathBuf,
}

impl EncryptedActivityLog {
    pub fn new(cipher: Arc<LineCipher>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: EncryptedLogStore::new(cipher),
            data_dir: data_dir.into(),
        }
    }

    pub fn path_of(&self, log: ActivityLog) -> PathBuf {
        self.data_dir.join(log.file_name())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Physical line count of one log, unreadable lines included.
    pub async fn line_count(&self, log: ActivityLog) -> Result<usize, StorageError> {
        self.store.line_count(&self.path_of(log)).await
    }
}

#[async_trait]
impl ActivityLogPort for EncryptedActivityLog {
    async fn append_history(
        &self,
        entry: HistoryEntry,
        max_items: Option<usize>,
    ) -> Result<(), StorageError> {
        self.store
            .write(&self.path_of(ActivityLog::History), &entry, max_items)
            .await
    }

    async fn read_history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        self.store
            .read_all(&self.path_of(ActivityLog::History))
            .await
    }

    async fn delete_history(
        &self,
        time: DateTime<Utc>,
        text: &str,
    ) -> Result<usize, StorageError> {
        self.store
            .delete_one(&self.path_of(ActivityLog::History), |e: &HistoryEntry| {
                e.matches(&time, text)
            })
            .await
    }

    async fn append_favorite(&self, entry: FavoriteEntry) -> Result<(), StorageError> {
        self.store
            .write(&self.path_of(ActivityLog::Favorites), &entry, None)
            .await
    }

    async fn read_favorites(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        self.store
            .read_all(&self.path_of(ActivityLog::Favorites))
            .await
    }

    async fn delete_favorite(
        &self,
        time: DateTime<Utc>,
        text: &str,
    ) -> Result<usize, StorageError> {
        self.store
            .delete_one(&self.path_of(ActivityLog::Favorites), |e: &FavoriteEntry| {
                e.matches(&time, text)
            })
            .await
    }

    async fn update_favorite_note(
        &self,
        time: DateTime<Utc>,
        note: &str,
    ) -> Result<usize, StorageError> {
        self.store
            .update_where(
                &self.path_of(ActivityLog::Favorites),
                time,
                |e: &mut FavoriteEntry| e.note = note.to_string(),
            )
            .await
    }

    async fn clear(&self, log: ActivityLog) -> Result<(), StorageError> {
        self.store.delete_all(&self.path_of(log)).await
    }

    async fn purge_unreadable(&self, log: ActivityLog) -> Result<usize, StorageError> {
        let path = self.path_of(log);
        match log {
            ActivityLog::History => self.store.purge_unreadable::<HistoryEntry>(&path).await,
            ActivityLog::Favorites => self.store.purge_unreadable::<FavoriteEntry>(&path).await,
        }
    }

    fn security_level(&self) -> SecurityLevel {
        self.store.cipher().security_level()
    }
}
