//! # lc-platform
//!
//! OS-facing adapters: the system clipboard, the clipboard monitor loop and
//! application directory resolution.

pub mod app_dirs;
pub mod clipboard;

pub use app_dirs::DataDirLocator;
pub use clipboard::{ClipboardMonitor, MonitorGate, SystemClipboard};
