use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use lc_core::ports::{ClipboardAccessError, ClipboardTextPort};

/// OS clipboard through `clipboard-rs`.
pub struct SystemClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardAccessError> {
        let context = ClipboardContext::new()
            .map_err(|e| ClipboardAccessError::Unavailable(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

#[async_trait]
impl ClipboardTextPort for SystemClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError> {
        let ctx = self
            .inner
            .lock()
            .map_err(|_| ClipboardAccessError::Read("clipboard context poisoned".into()))?;

        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }
        match ctx.get_text() {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(e) => Err(ClipboardAccessError::Read(e.to_string())),
        }
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardAccessError> {
        let ctx = self
            .inner
            .lock()
            .map_err(|_| ClipboardAccessError::Write("clipboard context poisoned".into()))?;
        ctx.set_text(text.to_string())
            .map_err(|e| ClipboardAccessError::Write(e.to_string()))
    }
}
