//! Exact-match phrase dictionary.
//!
//! Lookups are keyed by `(src, dest, normalized phrase)`. The table ships a
//! small built-in set and can be extended from a JSON array of
//! [`PhraseEntry`] objects; later entries replace earlier ones.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Source languages tried, in order, when a word's language is unknown.
const WORD_SOURCE_ORDER: &[&str] = &["en", "vi", "fr", "es", "de"];

const BUILTIN: &[(&str, &str, &str, &str)] = &[
    ("en", "vi", "hello world", "xin chào thế giới"),
    ("en", "vi", "hello", "xin chào"),
    ("en", "vi", "hi", "chào"),
    ("en", "vi", "world", "thế giới"),
    ("en", "vi", "thank you", "cảm ơn"),
    ("en", "vi", "thanks", "cảm ơn"),
    ("en", "vi", "goodbye", "tạm biệt"),
    ("en", "vi", "good morning", "chào buổi sáng"),
    ("en", "vi", "good night", "chúc ngủ ngon"),
    ("en", "vi", "how are you", "bạn khỏe không"),
    ("en", "vi", "yes", "có"),
    ("en", "vi", "no", "không"),
    ("en", "vi", "please", "làm ơn"),
    ("en", "vi", "sorry", "xin lỗi"),
    ("en", "vi", "friend", "bạn"),
    ("en", "vi", "water", "nước"),
    ("en", "vi", "love", "yêu"),
    ("vi", "en", "xin chào thế giới", "hello world"),
    ("vi", "en", "xin chào", "hello"),
    ("vi", "en", "chào", "hi"),
    ("vi", "en", "thế giới", "world"),
    ("vi", "en", "cảm ơn", "thank you"),
    ("vi", "en", "tạm biệt", "goodbye"),
    ("vi", "en", "xin lỗi", "sorry"),
    ("vi", "en", "bạn", "friend"),
    ("vi", "en", "nước", "water"),
    ("vi", "en", "yêu", "love"),
    ("en", "fr", "hello world", "bonjour le monde"),
    ("en", "fr", "hello", "bonjour"),
    ("en", "fr", "world", "monde"),
    ("en", "fr", "thank you", "merci"),
    ("en", "fr", "goodbye", "au revoir"),
    ("fr", "en", "bonjour", "hello"),
    ("fr", "en", "monde", "world"),
    ("fr", "en", "merci", "thank you"),
    ("fr", "en", "au revoir", "goodbye"),
    ("en", "es", "hello world", "hola mundo"),
    ("en", "es", "hello", "hola"),
    ("en", "es", "world", "mundo"),
    ("en", "es", "thank you", "gracias"),
    ("en", "es", "goodbye", "adiós"),
    ("es", "en", "hola", "hello"),
    ("es", "en", "mundo", "world"),
    ("es", "en", "gracias", "thank you"),
    ("en", "de", "hello", "hallo"),
    ("en", "de", "world", "welt"),
    ("en", "de", "thank you", "danke"),
    ("de", "en", "hallo", "hello"),
    ("de", "en", "welt", "world"),
    ("de", "en", "danke", "thank you"),
    ("en", "ja", "hello", "こんにちは"),
    ("en", "ja", "thank you", "ありがとう"),
    ("en", "zh", "hello", "你好"),
    ("en", "zh", "thank you", "谢谢"),
];

/// One dictionary row as stored in a phrase-table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub src: String,
    pub dest: String,
    pub phrase: String,
    pub translation: String,
}

#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    entries: HashMap<(String, String, String), String>,
}

/// Lower-case, trim, drop trailing `.`, `!` or `?`, collapse inner whitespace.
pub fn normalize_phrase(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = lowered.trim_end_matches(['.', '!', '?']);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl PhraseTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (src, dest, phrase, translation) in BUILTIN {
            table.insert(src, dest, phrase, translation);
        }
        table
    }

    pub fn insert(&mut self, src: &str, dest: &str, phrase: &str, translation: &str) {
        let key = (
            src.to_ascii_lowercase(),
            dest.to_ascii_lowercase(),
            normalize_phrase(phrase),
        );
        self.entries.insert(key, translation.to_string());
    }

    /// Merge entries parsed from a JSON array. Returns how many were added.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let rows: Vec<PhraseEntry> = serde_json::from_str(json)?;
        let count = rows.len();
        for row in rows {
            self.insert(&row.src, &row.dest, &row.phrase, &row.translation);
        }
        Ok(count)
    }

    pub fn lookup(&self, src: &str, dest: &str, text: &str) -> Option<&str> {
        let key = (
            src.to_ascii_lowercase(),
            dest.to_ascii_lowercase(),
            normalize_phrase(text),
        );
        self.entries.get(&key).map(String::as_str)
    }

    /// Look a phrase up without knowing its language.
    pub fn lookup_any_source(&self, dest: &str, text: &str) -> Option<&str> {
        WORD_SOURCE_ORDER
            .iter()
            .filter(|src| !src.eq_ignore_ascii_case(dest))
            .find_map(|src| self.lookup(src, dest, text))
    }

    /// Translate each whitespace-separated word on its own; words without an
    /// entry are kept as they were. Whitespace and the punctuation around a
    /// word are kept.
    pub fn translate_words(&self, dest: &str, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while !rest.is_empty() {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (word, tail) = rest.split_at(end);
            self.push_word(dest, word, &mut out);

            let gap = tail.find(|c: char| !c.is_whitespace()).unwrap_or(tail.len());
            out.push_str(&tail[..gap]);
            rest = &tail[gap..];
        }
        out
    }

    fn push_word(&self, dest: &str, word: &str, out: &mut String) {
        let from_start = word.trim_start_matches(|c: char| !c.is_alphanumeric());
        let bare = from_start.trim_end_matches(|c: char| !c.is_alphanumeric());
        match self.lookup_any_source(dest, bare).filter(|_| !bare.is_empty()) {
            Some(translation) => {
                out.push_str(&word[..word.len() - from_start.len()]);
                out.push_str(translation);
                out.push_str(&from_start[bare.len()..]);
            }
            None => out.push_str(word),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
