//! Activity trail use cases: history and favorites.
//! 活动记录用例：历史与收藏。

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lc_core::ports::{ActivityLogPort, ClockPort};
use lc_core::{ActivityLog, EntryOrigin, FavoriteEntry, HistoryEntry, SecurityLevel};
use tracing::{info, info_span, Instrument};

/// History and favorites operations exposed to the UI and the orchestrator.
///
/// Entries carry no id. `delete_*` match on `(time, text)` and
/// [`ActivityTrail::update_favorite_note`] matches on `time` alone.
pub struct ActivityTrail {
    log: Arc<dyn ActivityLogPort>,
    clock: Arc<dyn ClockPort>,
    max_history_items: usize,
}

impl ActivityTrail {
    pub fn new(
        log: Arc<dyn ActivityLogPort>,
        clock: Arc<dyn ClockPort>,
        max_history_items: usize,
    ) -> Self {
        Self {
            log,
            clock,
            max_history_items: max_history_items.max(1),
        }
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.log.security_level()
    }

    /// Append a history entry stamped with the current time, dropping the
    /// oldest entries beyond the configured maximum.
    pub async fn write_history(
        &self,
        text: &str,
        src_lang: &str,
        dest_lang: &str,
        origin: EntryOrigin,
    ) -> Result<HistoryEntry> {
        let span = info_span!("usecase.activity.write_history", origin = origin.as_str());
        async {
            let entry = HistoryEntry {
                time: self.clock.now(),
                text: text.to_string(),
                src_lang: src_lang.to_string(),
                dest_lang: dest_lang.to_string(),
                origin,
            };
            self.log
                .append_history(entry.clone(), Some(self.max_history_items))
                .await
                .context("append history entry failed")?;
            Ok(entry)
        }
        .instrument(span)
        .await
    }

    pub async fn read_history(&self) -> Result<Vec<HistoryEntry>> {
        self.log
            .read_history()
            .await
            .context("read history failed")
    }

    pub async fn delete_history(&self, time: DateTime<Utc>, text: &str) -> Result<usize> {
        let span = info_span!("usecase.activity.delete_history");
        async {
            let removed = self
                .log
                .delete_history(time, text)
                .await
                .context("delete history entry failed")?;
            info!(removed, "history entries deleted");
            Ok(removed)
        }
        .instrument(span)
        .await
    }

    pub async fn delete_all_history(&self) -> Result<()> {
        let span = info_span!("usecase.activity.delete_all_history");
        async {
            self.log
                .clear(ActivityLog::History)
                .await
                .context("clear history failed")?;
            info!("history cleared");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Drop history lines that no longer decrypt, e.g. after the interface
    /// language or theme changed.
    pub async fn purge_unreadable_history(&self) -> Result<usize> {
        let span = info_span!("usecase.activity.purge_unreadable_history");
        async {
            let removed = self
                .log
                .purge_unreadable(ActivityLog::History)
                .await
                .context("purge unreadable history failed")?;
            info!(removed, "unreadable history lines purged");
            Ok(removed)
        }
        .instrument(span)
        .await
    }

    pub async fn write_favorite(
        &self,
        original_text: &str,
        translated_text: &str,
        src_lang: &str,
        dest_lang: &str,
        note: &str,
    ) -> Result<FavoriteEntry> {
        let span = info_span!("usecase.activity.write_favorite");
        async {
            let entry = FavoriteEntry {
                time: self.clock.now(),
                original_text: original_text.to_string(),
                translated_text: translated_text.to_string(),
                src_lang: src_lang.to_string(),
                dest_lang: dest_lang.to_string(),
                note: note.to_string(),
            };
            self.log
                .append_favorite(entry.clone())
                .await
                .context("append favorite failed")?;
            Ok(entry)
        }
        .instrument(span)
        .await
    }

    pub async fn read_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        self.log
            .read_favorites()
            .await
            .context("read favorites failed")
    }

    pub async fn delete_favorite(&self, time: DateTime<Utc>, text: &str) -> Result<usize> {
        let span = info_span!("usecase.activity.delete_favorite");
        async {
            let removed = self
                .log
                .delete_favorite(time, text)
                .await
                .context("delete favorite failed")?;
            info!(removed, "favorites deleted");
            Ok(removed)
        }
        .instrument(span)
        .await
    }

    pub async fn update_favorite_note(&self, time: DateTime<Utc>, note: &str) -> Result<usize> {
        let span = info_span!("usecase.activity.update_favorite_note");
        async {
            let updated = self
                .log
                .update_favorite_note(time, note)
                .await
                .context("update favorite note failed")?;
            info!(updated, "favorite notes updated");
            Ok(updated)
        }
        .instrument(span)
        .await
    }

    pub async fn delete_all_favorites(&self) -> Result<()> {
        let span = info_span!("usecase.activity.delete_all_favorites");
        async {
            self.log
                .clear(ActivityLog::Favorites)
                .await
                .context("clear favorites failed")?;
            info!("favorites cleared");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use lc_core::ports::StorageError;
    use std::sync::Mutex;

    /// In-memory log recording the cap passed on each append.
    #[derive(Default)]
    struct MemoryLog {
        history: Mutex<Vec<HistoryEntry>>,
        favorites: Mutex<Vec<FavoriteEntry>>,
        caps: Mutex<Vec<Option<usize>>>,
    }

    #[async_trait]
    impl ActivityLogPort for MemoryLog {
        async fn append_history(
            &self,
            entry: HistoryEntry,
            max_items: Option<usize>,
        ) -> Result<(), StorageError> {
            self.caps.lock().unwrap().push(max_items);
            self.history.lock().unwrap().push(entry);
            Ok(())
        }

        async fn read_history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
            Ok(self.history.lock().unwrap().clone())
        }

        async fn delete_history(
            &self,
            time: DateTime<Utc>,
            text: &str,
        ) -> Result<usize, StorageError> {
            let mut history = self.history.lock().unwrap();
            let before = history.len();
            history.retain(|e| !(e.time == time && e.text == text));
            Ok(before - history.len())
        }

        async fn append_favorite(&self, entry: FavoriteEntry) -> Result<(), StorageError> {
            self.favorites.lock().unwrap().push(entry);
            Ok(())
        }

        async fn read_favorites(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
            Ok(self.favorites.lock().unwrap().clone())
        }

        async fn delete_favorite(
            &self,
            time: DateTime<Utc>,
            text: &str,
        ) -> Result<usize, StorageError> {
            let mut favorites = self.favorites.lock().unwrap();
            let before = favorites.len();
            favorites.retain(|e| !(e.time == time && e.original_text == text));
            Ok(before - favorites.len())
        }

        async fn update_favorite_note(
            &self,
            time: DateTime<Utc>,
            note: &str,
        ) -> Result<usize, StorageError> {
            let mut count = 0;
            for entry in self.favorites.lock().unwrap().iter_mut() {
                if entry.time == time {
                    entry.note = note.to_string();
                    count += 1;
                }
            }
            Ok(count)
        }

        async fn clear(&self, log: ActivityLog) -> Result<(), StorageError> {
            match log {
                ActivityLog::History => self.history.lock().unwrap().clear(),
                ActivityLog::Favorites => self.favorites.lock().unwrap().clear(),
            }
            Ok(())
        }

        async fn purge_unreadable(&self, _log: ActivityLog) -> Result<usize, StorageError> {
            Ok(0)
        }

        fn security_level(&self) -> SecurityLevel {
            SecurityLevel::Encrypted
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl ClockPort for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn trail(max: usize) -> (ActivityTrail, Arc<MemoryLog>) {
        let log = Arc::new(MemoryLog::default());
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()));
        (ActivityTrail::new(log.clone(), clock, max), log)
    }

    #[tokio::test]
    async fn write_history_stamps_time_and_passes_cap() {
        let (trail, log) = trail(50);

        let entry = trail
            .write_history("hello", "en", "vi", EntryOrigin::Popup)
            .await
            .unwrap();

        assert_eq!(entry.time, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
        assert_eq!(*log.caps.lock().unwrap(), vec![Some(50)]);
        assert_eq!(trail.read_history().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn favorites_round_through_note_update_and_delete() {
        let (trail, _log) = trail(10);

        let fav = trail
            .write_favorite("hello", "xin chào", "en", "vi", "")
            .await
            .unwrap();
        assert_eq!(trail.update_favorite_note(fav.time, "greeting").await.unwrap(), 1);
        assert_eq!(trail.read_favorites().await.unwrap()[0].note, "greeting");

        assert_eq!(trail.delete_favorite(fav.time, "hello").await.unwrap(), 1);
        assert!(trail.read_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_all_only_touches_one_log() {
        let (trail, _log) = trail(10);
        trail
            .write_history("a", "en", "vi", EntryOrigin::Homepage)
            .await
            .unwrap();
        trail.write_favorite("a", "b", "en", "vi", "").await.unwrap();

        trail.delete_all_history().await.unwrap();

        assert!(trail.read_history().await.unwrap().is_empty());
        assert_eq!(trail.read_favorites().await.unwrap().len(), 1);

        trail.delete_all_favorites().await.unwrap();
        assert!(trail.read_favorites().await.unwrap().is_empty());
    }
}
