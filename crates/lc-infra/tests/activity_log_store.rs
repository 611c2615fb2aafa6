//! Storage guarantees of the encrypted activity log, exercised through the
//! port the application layer uses.

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lc_core::ports::ActivityLogPort;
use lc_core::{ActivityLog, EntryOrigin, FavoriteEntry, HistoryEntry, SecurityLevel};
use lc_infra::{EncryptedActivityLog, LineCipher};
use tempfile::TempDir;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn history(n: i64) -> HistoryEntry {
    HistoryEntry {
        time: base_time() + Duration::milliseconds(n * 250),
        text: format!("entry {n}"),
        src_lang: "en".to_string(),
        dest_lang: "vi".to_string(),
        origin: EntryOrigin::Popup,
    }
}

fn favorite(n: i64) -> FavoriteEntry {
    FavoriteEntry {
        time: base_time() + Duration::seconds(n),
        original_text: format!("original {n}"),
        translated_text: format!("translated {n}"),
        src_lang: "en".to_string(),
        dest_lang: "vi".to_string(),
        note: String::new(),
    }
}

fn open(dir: &TempDir) -> EncryptedActivityLog {
    EncryptedActivityLog::new(
        Arc::new(LineCipher::from_preferences("en", "light")),
        dir.path(),
    )
}

fn append_raw_line(log: &EncryptedActivityLog, which: ActivityLog, line: &str) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(log.path_of(which))
        .unwrap();
    writeln!(file, "{line}").unwrap();
}

#[tokio::test]
async fn cap_keeps_only_the_newest_entries() {
    let dir = TempDir::new().unwrap();
    let log = open(&dir);
    let cap = 5;

    for n in 0..=cap as i64 {
        log.append_history(history(n), Some(cap)).await.unwrap();
    }

    let entries = log.read_history().await.unwrap();
    assert_eq!(entries.len(), cap);
    assert_eq!(entries.first().unwrap(), &history(1));
    assert_eq!(entries.last().unwrap(), &history(cap as i64));
}

#[tokio::test]
async fn malformed_line_is_skipped_and_survives_unrelated_delete() {
    let dir = TempDir::new().unwrap();
    let log = open(&dir);

    for n in 0..3 {
        log.append_history(history(n), None).await.unwrap();
    }
    append_raw_line(&log, ActivityLog::History, "this-is-not-a-valid-record");

    let entries = log.read_history().await.unwrap();
    assert_eq!(entries.len(), 3);

    let target = history(1);
    let removed = log.delete_history(target.time, &target.text).await.unwrap();
    assert_eq!(removed, 1);

    let raw = std::fs::read_to_string(log.path_of(ActivityLog::History)).unwrap();
    assert!(raw.contains("this-is-not-a-valid-record"));
    assert_eq!(log.line_count(ActivityLog::History).await.unwrap(), 3);
    assert_eq!(log.read_history().await.unwrap().len(), 2);
}

#[tokio::test]
async fn non_utf8_line_does_not_break_the_log() {
    let dir = TempDir::new().unwrap();
    let log = open(&dir);

    for n in 0..3 {
        log.append_history(history(n), None).await.unwrap();
    }
    let path = log.path_of(ActivityLog::History);
    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"\xff\xfe garbage\n").unwrap();
    drop(file);

    assert_eq!(log.read_history().await.unwrap().len(), 3);

    log.append_history(history(3), None).await.unwrap();
    let target = history(0);
    assert_eq!(log.delete_history(target.time, &target.text).await.unwrap(), 1);

    let raw = std::fs::read(&path).unwrap();
    assert!(raw.windows(10).any(|w| w == b"\xff\xfe garbage"));
    assert_eq!(log.line_count(ActivityLog::History).await.unwrap(), 4);
    let texts: Vec<_> = log
        .read_history()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.text)
        .collect();
    assert_eq!(texts, ["entry 1", "entry 2", "entry 3"]);

    assert_eq!(log.purge_unreadable(ActivityLog::History).await.unwrap(), 1);
    assert_eq!(log.line_count(ActivityLog::History).await.unwrap(), 3);
}

#[tokio::test]
async fn lines_from_another_key_are_unreadable_but_kept() {
    let dir = TempDir::new().unwrap();
    let old = EncryptedActivityLog::new(
        Arc::new(LineCipher::from_preferences("vi", "dark")),
        dir.path(),
    );
    old.append_history(history(0), None).await.unwrap();

    let log = open(&dir);
    log.append_history(history(1), None).await.unwrap();

    assert_eq!(log.read_history().await.unwrap(), vec![history(1)]);
    assert_eq!(log.line_count(ActivityLog::History).await.unwrap(), 2);

    let purged = log.purge_unreadable(ActivityLog::History).await.unwrap();
    assert_eq!(purged, 1);
    assert_eq!(log.line_count(ActivityLog::History).await.unwrap(), 1);
}

#[tokio::test]
async fn clear_empties_a_log() {
    let dir = TempDir::new().unwrap();
    let log = open(&dir);
    log.append_history(history(0), None).await.unwrap();
    log.append_favorite(favorite(0)).await.unwrap();

    log.clear(ActivityLog::History).await.unwrap();

    assert!(log.read_history().await.unwrap().is_empty());
    let meta = std::fs::metadata(log.path_of(ActivityLog::History)).unwrap();
    assert_eq!(meta.len(), 0);
    assert_eq!(log.read_favorites().await.unwrap().len(), 1);
}

#[tokio::test]
async fn favorite_note_update_and_delete() {
    let dir = TempDir::new().unwrap();
    let log = open(&dir);
    log.append_favorite(favorite(0)).await.unwrap();
    log.append_favorite(favorite(1)).await.unwrap();

    let updated = log
        .update_favorite_note(favorite(1).time, "remember this")
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let favorites = log.read_favorites().await.unwrap();
    assert_eq!(favorites[0].note, "");
    assert_eq!(favorites[1].note, "remember this");

    let removed = log
        .delete_favorite(favorite(0).time, "original 0")
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(log.read_favorites().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_appends_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(open(&dir));

    let mut tasks = Vec::new();
    for n in 0..20 {
        let log = log.clone();
        tasks.push(tokio::spawn(async move {
            log.append_history(history(n), None).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(log.read_history().await.unwrap().len(), 20);
}

#[tokio::test]
async fn security_level_is_reported() {
    let dir = TempDir::new().unwrap();
    assert_eq!(open(&dir).security_level(), SecurityLevel::Encrypted);

    let degraded = EncryptedActivityLog::new(Arc::new(LineCipher::degraded()), dir.path());
    assert_eq!(degraded.security_level(), SecurityLevel::Degraded);
}
