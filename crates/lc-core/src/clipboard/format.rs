//! Clipboard text normalization.
//! 剪贴板文本规范化。

use std::collections::{HashMap, VecDeque};
use std::hash::Hasher;

use twox_hash::XxHash64;

const MAX_BLANK_RUN: usize = 2;

/// Normalize copied text before it is translated.
///
/// ## Behavior / 行为
/// - CR/LF and lone CR become LF
/// - control characters are removed, except `\n` and `\t`
/// - every line is trimmed on both sides, which also removes any indentation
///   shared by all non-empty lines
/// - runs of three or more blank lines collapse to two
/// - leading and trailing blank lines are dropped
pub fn format_clipboard_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = unified
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in cleaned.split('\n').map(str::trim) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > MAX_BLANK_RUN {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Cheap, stable content hash used as the formatting cache key.
pub fn content_hash(text: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(text.as_bytes());
    hasher.finish()
}

/// Bounded cache of formatted clipboard texts keyed by [`content_hash`].
///
/// Eviction is first-in first-out; the monitor sees a handful of distinct
/// values at a time so recency tracking is not worth it.
pub struct FormatCache {
    entries: HashMap<u64, String>,
    order: VecDeque<u64>,
    capacity: usize,
}

impl FormatCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Return the formatted text for `raw`, formatting and caching on a miss.
    pub fn format(&mut self, raw: &str) -> String {
        let key = content_hash(raw);
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }

        let formatted = format_clipboard_text(raw);
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key, formatted.clone());
        self.order.push_back(key);
        formatted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
