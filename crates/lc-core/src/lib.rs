//! # lc-core
//!
//! Core domain models and business logic for LingoClip.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! activity entries, settings, clipboard text formatting, the adaptive poll
//! schedule, language detection, the phrase table and the port traits that the
//! infrastructure and platform crates implement.

pub mod activity;
pub mod app_dirs;
pub mod clipboard;
pub mod ports;
pub mod security;
pub mod settings;
pub mod translation;

// Re-export commonly used types at the crate root
pub use activity::{ActivityLog, EntryOrigin, FavoriteEntry, HistoryEntry, LogRecord};
pub use clipboard::ClipboardSnapshot;
pub use security::{CryptoError, SecurityLevel};
pub use settings::model::Settings;
pub use translation::{Translation, TranslationError, TranslationRequest};
