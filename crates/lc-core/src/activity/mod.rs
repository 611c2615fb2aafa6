//! Activity trail domain: history and favorites entries.
//!
//! Entries have no true identifier. Deletion matches on `(time, text)` and
//! favorite note updates match on `time` alone, so two entries created in the
//! same instant with the same text are indistinguishable.

mod entry;
mod origin;

pub use entry::{FavoriteEntry, HistoryEntry, LogRecord};
pub use origin::EntryOrigin;

/// The two append-only logs that make up the activity trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLog {
    History,
    Favorites,
}

impl ActivityLog {
    pub fn file_name(&self) -> &'static str {
        match self {
            ActivityLog::History => "history.log",
            ActivityLog::Favorites => "favorites.log",
        }
    }
}
