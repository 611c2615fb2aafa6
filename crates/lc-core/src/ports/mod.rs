//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and the infrastructure/platform implementations, so the pipeline can be
//! driven by in-memory doubles in tests.

pub mod activity_log;
pub mod app_dirs;
pub mod clipboard;
mod clipboard_change_handler;
mod clock;
pub mod errors;
mod monitor_control;
pub mod settings;
pub mod translator;
pub mod ui_port;

pub use activity_log::ActivityLogPort;
pub use app_dirs::AppDirsPort;
pub use clipboard::ClipboardTextPort;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::*;
pub use errors::{AppDirsError, ClipboardAccessError, SettingsError, StorageError};
pub use monitor_control::MonitorControlPort;
pub use settings::SettingsPort;
pub use translator::TranslatorPort;
pub use ui_port::{NoticeLevel, TranslationNotice, UiPort};
