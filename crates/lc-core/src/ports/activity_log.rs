//! Activity log port - encrypted history and favorites persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::StorageError;
use crate::activity::{ActivityLog, FavoriteEntry, HistoryEntry};
use crate::security::SecurityLevel;

/// Persistence for the two activity logs.
///
/// Entries have no unique id: deletion matches `(time, text)` and note
/// updates match `time` only. Lines that cannot be decrypted are never
/// returned and never removed, except by [`ActivityLogPort::purge_unreadable`].
#[async_trait]
pub trait ActivityLogPort: Send + Sync {
    /// Append to history, keeping at most `max_items` entries when given.
    async fn append_history(
        &self,
        entry: HistoryEntry,
        max_items: Option<usize>,
    ) -> Result<(), StorageError>;

    async fn read_history(&self) -> Result<Vec<HistoryEntry>, StorageError>;

    async fn delete_history(
        &self,
        time: DateTime<Utc>,
        text: &str,
    ) -> Result<usize, StorageError>;

    async fn append_favorite(&self, entry: FavoriteEntry) -> Result<(), StorageError>;

    async fn read_favorites(&self) -> Result<Vec<FavoriteEntry>, StorageError>;

    async fn delete_favorite(
        &self,
        time: DateTime<Utc>,
        text: &str,
    ) -> Result<usize, StorageError>;

    /// Replace the note of every favorite whose time equals `time`.
    async fn update_favorite_note(
        &self,
        time: DateTime<Utc>,
        note: &str,
    ) -> Result<usize, StorageError>;

    /// Truncate one log to zero length.
    async fn clear(&self, log: ActivityLog) -> Result<(), StorageError>;

    /// Drop lines that no longer decrypt. Returns how many were removed.
    async fn purge_unreadable(&self, log: ActivityLog) -> Result<usize, StorageError>;

    fn security_level(&self) -> SecurityLevel;
}
