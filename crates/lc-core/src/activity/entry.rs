use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::EntryOrigin;

/// A record that can be stored as one line of an encrypted activity log.
pub trait LogRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn time(&self) -> DateTime<Utc>;

    /// Text used together with [`LogRecord::time`] as the pseudo-identity.
    fn text(&self) -> &str;

    fn matches(&self, time: &DateTime<Utc>, text: &str) -> bool {
        self.time() == *time && self.text() == text
    }
}

/// One translated clipboard or homepage text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub time: DateTime<Utc>,
    pub text: String,
    pub src_lang: String,
    pub dest_lang: String,
    pub origin: EntryOrigin,
}

impl LogRecord for HistoryEntry {
    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// A translation the user chose to keep. `note` stays editable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub time: DateTime<Utc>,
    pub original_text: String,
    pub translated_text: String,
    pub src_lang: String,
    pub dest_lang: String,
    #[serde(default)]
    pub note: String,
}

impl LogRecord for FavoriteEntry {
    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn text(&self) -> &str {
        &self.original_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn favorite_without_note_deserializes_with_empty_note() {
        let json = r#"{
            "time": "2024-05-01T08:30:00.250Z",
            "original_text": "hello",
            "translated_text": "xin chào",
            "src_lang": "en",
            "dest_lang": "vi"
        }"#;

        let entry: FavoriteEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.note, "");
        assert_eq!(entry.text(), "hello");
    }

    #[test]
    fn matches_requires_both_time_and_text() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let entry = HistoryEntry {
            time,
            text: "hello".into(),
            src_lang: "en".into(),
            dest_lang: "vi".into(),
            origin: EntryOrigin::Popup,
        };

        assert!(entry.matches(&time, "hello"));
        assert!(!entry.matches(&time, "hello!"));
        assert!(!entry.matches(&(time + chrono::Duration::seconds(1)), "hello"));
    }
}
