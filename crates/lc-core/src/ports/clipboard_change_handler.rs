//! Clipboard change handler port
//!
//! The platform monitor depends on this callback; the application layer
//! implements it, so the monitor never sees application types.

use anyhow::Result;

use crate::clipboard::ClipboardSnapshot;

/// Callback for detected clipboard changes.
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// Called with the formatted text of a new clipboard value. Never called
    /// with empty text.
    async fn on_clipboard_changed(&self, snapshot: ClipboardSnapshot) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_is_object_safe() {
        fn assert_object_safe(_handler: Option<&dyn ClipboardChangeHandler>) {}
        assert_object_safe(None);
    }
}
