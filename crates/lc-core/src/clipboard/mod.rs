//! Clipboard domain: snapshots, text formatting and the adaptive poll schedule.

mod format;
mod poll;
mod snapshot;

pub use format::{content_hash, format_clipboard_text, FormatCache};
pub use poll::{FailureTracker, PollConfig, PollSchedule, RetryPolicy};
pub use snapshot::ClipboardSnapshot;
