use chrono::{DateTime, Utc};

/// Last observed clipboard text, held only for change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    pub text: String,
    pub observed_at: DateTime<Utc>,
}

impl ClipboardSnapshot {
    pub fn new(text: impl Into<String>, observed_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            observed_at,
        }
    }

    /// A change is a non-empty text that differs from the stored one.
    pub fn is_change(last: Option<&ClipboardSnapshot>, current: &str) -> bool {
        if current.trim().is_empty() {
            return false;
        }
        match last {
            Some(snapshot) => snapshot.text != current,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_whitespace_text_is_never_a_change() {
        assert!(!ClipboardSnapshot::is_change(None, ""));
        assert!(!ClipboardSnapshot::is_change(None, " \n\t"));
    }

    #[test]
    fn identical_text_is_not_a_change() {
        let last = ClipboardSnapshot::new("hello", Utc::now());
        assert!(!ClipboardSnapshot::is_change(Some(&last), "hello"));
        assert!(ClipboardSnapshot::is_change(Some(&last), "hello world"));
    }
}
