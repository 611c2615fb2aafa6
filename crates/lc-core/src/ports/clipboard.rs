//! Clipboard port - plain-text access to the OS clipboard.

use async_trait::async_trait;

use super::errors::ClipboardAccessError;

/// Text-only clipboard access used by the monitor.
///
/// 只读写纯文本的剪贴板端口。
#[async_trait]
pub trait ClipboardTextPort: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// `Ok(None)` means the clipboard holds no text (empty, or a non-text
    /// format). Errors are transient; callers retry.
    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardAccessError>;
}
