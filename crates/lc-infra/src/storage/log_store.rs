//! Encrypted append-only log files.
//!
//! One entry per line, each line encrypted independently by [`LineCipher`].
//! Every mutation rewrites the whole file through a temp file and a rename,
//! so a crash leaves either the old or the new content.
//!
//! Lines are handled as raw bytes. Lines that are not UTF-8, fail to decrypt
//! or fail to parse are skipped on read and carried over byte for byte on
//! every rewrite; only [`EncryptedLogStore::purge_unreadable`] and
//! [`EncryptedLogStore::delete_all`] remove them. Blank lines hold no entry
//! and are not written back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Utc};
use lc_core::ports::StorageError;
use lc_core::LogRecord;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::security::LineCipher;

/// One physical line without its terminator.
type RawLine = Vec<u8>;

/// Decrypted plaintexts of the readable lines of one file, in file order.
type PlainLines = Arc<Vec<String>>;

/// Lock and read cache for one log path. The lock is held for the whole
/// read-modify-write cycle; the cache is cleared by every mutation.
type PathSlot = Arc<Mutex<Option<PlainLines>>>;

pub struct EncryptedLogStore {
    cipher: Arc<LineCipher>,
    slots: StdMutex<HashMap<PathBuf, PathSlot>>,
}

impl EncryptedLogStore {
    pub fn new(cipher: Arc<LineCipher>) -> Self {
        Self {
            cipher,
            slots: StdMutex::new(HashMap::new()),
        }
    }

    pub fn cipher(&self) -> &LineCipher {
        &self.cipher
    }

    fn slot(&self, path: &Path) -> PathSlot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.entry(path.to_path_buf()).or_default().clone()
    }

    /// Append `entry`. With a cap, only the newest `max_items - 1` existing
    /// lines are kept before appending, so the file never holds more than
    /// `max_items` lines. A cap of zero is treated as one.
    pub async fn write<R: LogRecord>(
        &self,
        path: &Path,
        entry: &R,
        max_items: Option<usize>,
    ) -> Result<(), StorageError> {
        let plaintext = serde_json::to_string(entry)?;
        let line = self.cipher.encrypt(&plaintext)?;

        let slot = self.slot(path);
        let mut cache = slot.lock().await;

        let mut lines = read_lines(path).await?;
        if let Some(max) = max_items {
            let keep = max.max(1) - 1;
            if lines.len() > keep {
                let dropped = lines.len() - keep;
                lines.drain(..dropped);
                debug!(path = %path.display(), dropped, "dropped oldest log lines over cap");
            }
        }
        lines.push(line.into_bytes());

        rewrite(path, &lines).await?;
        *cache = None;
        Ok(())
    }

    /// All readable entries in file order.
    pub async fn read_all<R: LogRecord>(&self, path: &Path) -> Result<Vec<R>, StorageError> {
        let slot = self.slot(path);
        let mut cache = slot.lock().await;

        let plain = match cache.as_ref() {
            Some(hit) => hit.clone(),
            None => {
                let lines = read_lines(path).await?;
                let plain: Vec<String> = lines
                    .iter()
                    .filter_map(|line| {
                        let Ok(line) = std::str::from_utf8(line) else {
                            debug!(path = %path.display(), "skipping non-utf8 log line");
                            return None;
                        };
                        match self.cipher.try_decrypt(line) {
                            Ok(text) => Some(text),
                            Err(e) => {
                                debug!(path = %path.display(), error = %e, "skipping unreadable log line");
                                None
                            }
                        }
                    })
                    .collect();
                let plain = Arc::new(plain);
                *cache = Some(plain.clone());
                plain
            }
        };

        Ok(plain
            .iter()
            .filter_map(|text| match serde_json::from_str::<R>(text) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping log line with unexpected shape");
                    None
                }
            })
            .collect())
    }

    /// Remove every entry for which `predicate` holds. Unreadable lines are
    /// always kept. Returns the number of removed lines.
    pub async fn delete_one<R, F>(&self, path: &Path, predicate: F) -> Result<usize, StorageError>
    where
        R: LogRecord,
        F: Fn(&R) -> bool + Send,
    {
        let slot = self.slot(path);
        let mut cache = slot.lock().await;

        let lines = read_lines(path).await?;
        let before = lines.len();
        let kept: Vec<RawLine> = lines
            .into_iter()
            .filter(|line| match self.decode::<R>(line) {
                Some(entry) => !predicate(&entry),
                None => true,
            })
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            rewrite(path, &kept).await?;
            *cache = None;
        }
        Ok(removed)
    }

    /// Remove lines that cannot be decrypted or parsed as `R`.
    pub async fn purge_unreadable<R: LogRecord>(&self, path: &Path) -> Result<usize, StorageError> {
        let slot = self.slot(path);
        let mut cache = slot.lock().await;

        let lines = read_lines(path).await?;
        let before = lines.len();
        let kept: Vec<RawLine> = lines
            .into_iter()
            .filter(|line| self.decode::<R>(line).is_some())
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            warn!(path = %path.display(), removed, "purged unreadable log lines");
            rewrite(path, &kept).await?;
            *cache = None;
        }
        Ok(removed)
    }

    /// Truncate the file to zero length. A missing file stays missing.
    pub async fn delete_all(&self, path: &Path) -> Result<(), StorageError> {
        let slot = self.slot(path);
        let mut cache = slot.lock().await;

        match fs::metadata(path).await {
            Ok(_) => fs::write(path, b"").await?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *cache = None;
        Ok(())
    }

    /// Re-encrypt, after `mutate`, every entry whose time equals `time`.
    /// Other lines are written back byte for byte. Returns the update count.
    pub async fn update_where<R, F>(
        &self,
        path: &Path,
        time: DateTime<Utc>,
        mutate: F,
    ) -> Result<usize, StorageError>
    where
        R: LogRecord,
        F: Fn(&mut R) + Send,
    {
        let slot = self.slot(path);
        let mut cache = slot.lock().await;

        let mut lines = read_lines(path).await?;
        let mut updated = 0;
        for line in lines.iter_mut() {
            let Some(mut entry) = self.decode::<R>(line) else {
                continue;
            };
            if entry.time() != time {
                continue;
            }
            mutate(&mut entry);
            *line = self.cipher.encrypt(&serde_json::to_string(&entry)?)?.into_bytes();
            updated += 1;
        }

        if updated > 0 {
            rewrite(path, &lines).await?;
            *cache = None;
        }
        Ok(updated)
    }

    /// Physical line count, readable or not.
    pub async fn line_count(&self, path: &Path) -> Result<usize, StorageError> {
        let slot = self.slot(path);
        let _guard = slot.lock().await;
        Ok(read_lines(path).await?.len())
    }

    fn decode<R: LogRecord>(&self, line: &[u8]) -> Option<R> {
        let line = std::str::from_utf8(line).ok()?;
        let text = self.cipher.try_decrypt(line).ok()?;
        serde_json::from_str(&text).ok()
    }
}

async fn read_lines(path: &Path) -> Result<Vec<RawLine>, StorageError> {
    let content = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(content
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(<[u8]>::to_vec)
        .collect())
}

async fn rewrite(path: &Path, lines: &[RawLine]) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }

    let mut content = lines.join(&b'\n');
    if !content.is_empty() {
        content.push(b'\n');
    }

    let tmp_path = path.with_extension("log.tmp");
    fs::write(&tmp_path, content).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use lc_core::{EntryOrigin, FavoriteEntry, HistoryEntry};
    use tempfile::TempDir;

    fn store() -> EncryptedLogStore {
        EncryptedLogStore::new(Arc::new(LineCipher::from_preferences("en", "light")))
    }

    fn history(n: i64, text: &str) -> HistoryEntry {
        HistoryEntry {
            time: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::seconds(n),
            text: text.to_string(),
            src_lang: "en".to_string(),
            dest_lang: "vi".to_string(),
            origin: EntryOrigin::Popup,
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let entries: Vec<HistoryEntry> = store().read_all(&dir.path().join("none.log")).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn write_creates_parent_dir_and_appends_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/history.log");
        let store = store();

        store.write(&path, &history(0, "one"), None).await.unwrap();
        store.write(&path, &history(1, "two"), None).await.unwrap();

        let entries: Vec<HistoryEntry> = store.read_all(&path).await.unwrap();
        let texts: Vec<_> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[tokio::test]
    async fn file_content_is_not_plaintext() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.log");
        store().write(&path, &history(0, "very private"), None).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("very private"));
        assert_eq!(raw.lines().count(), 1);
    }

    #[tokio::test]
    async fn cache_is_invalidated_by_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.log");
        let store = store();

        store.write(&path, &history(0, "one"), None).await.unwrap();
        let first: Vec<HistoryEntry> = store.read_all(&path).await.unwrap();
        store.write(&path, &history(1, "two"), None).await.unwrap();
        let second: Vec<HistoryEntry> = store.read_all(&path).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn zero_cap_keeps_only_the_new_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.log");
        let store = store();

        store.write(&path, &history(0, "one"), None).await.unwrap();
        store.write(&path, &history(1, "two"), Some(0)).await.unwrap();

        let entries: Vec<HistoryEntry> = store.read_all(&path).await.unwrap();
        assert_eq!(entries, vec![history(1, "two")]);
    }

    #[tokio::test]
    async fn delete_one_matches_time_and_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.log");
        let store = store();
        let target = history(1, "two");

        store.write(&path, &history(0, "one"), None).await.unwrap();
        store.write(&path, &target, None).await.unwrap();
        store.write(&path, &history(1, "other"), None).await.unwrap();

        let removed = store
            .delete_one(&path, |e: &HistoryEntry| e.matches(&target.time, &target.text))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        let entries: Vec<HistoryEntry> = store.read_all(&path).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries.contains(&target));
    }

    #[tokio::test]
    async fn update_where_rewrites_only_matching_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.log");
        let store = store();
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        let favorite = |t: DateTime<Utc>, text: &str| FavoriteEntry {
            time: t,
            original_text: text.to_string(),
            translated_text: format!("{text}-vi"),
            src_lang: "en".to_string(),
            dest_lang: "vi".to_string(),
            note: String::new(),
        };
        store.write(&path, &favorite(time, "a"), None).await.unwrap();
        store
            .write(&path, &favorite(time + Duration::seconds(1), "b"), None)
            .await
            .unwrap();

        let before = std::fs::read_to_string(&path).unwrap();
        let untouched = before.lines().nth(1).unwrap().to_string();

        let updated = store
            .update_where(&path, time, |f: &mut FavoriteEntry| f.note = "keep".into())
            .await
            .unwrap();

        assert_eq!(updated, 1);
        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(after.lines().nth(1).unwrap(), untouched);

        let entries: Vec<FavoriteEntry> = store.read_all(&path).await.unwrap();
        assert_eq!(entries[0].note, "keep");
        assert_eq!(entries[1].note, "");
    }

    #[tokio::test]
    async fn purge_unreadable_removes_only_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.log");
        let store = store();

        store.write(&path, &history(0, "one"), None).await.unwrap();
        let mut raw = std::fs::read_to_string(&path).unwrap();
        raw.push_str("garbage-line\n");
        std::fs::write(&path, raw).unwrap();

        assert_eq!(store.line_count(&path).await.unwrap(), 2);
        let removed = store.purge_unreadable::<HistoryEntry>(&path).await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.line_count(&path).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn blank_lines_are_not_written_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.log");
        let store = store();

        store.write(&path, &history(0, "one"), None).await.unwrap();
        let mut raw = std::fs::read_to_string(&path).unwrap();
        raw.push_str("\n   \n");
        std::fs::write(&path, raw).unwrap();

        assert_eq!(store.line_count(&path).await.unwrap(), 1);
        store.write(&path, &history(1, "two"), None).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.lines().all(|line| !line.trim().is_empty()));
    }
}
