use anyhow::Result;
use async_trait::async_trait;

use crate::activity::EntryOrigin;

/// A finished translation ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationNotice {
    pub origin: EntryOrigin,
    pub original_text: String,
    pub translated_text: String,
    pub src_lang: String,
    pub dest_lang: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Rendering surface. Layout and widgets live behind this port.
#[async_trait]
pub trait UiPort: Send + Sync {
    async fn show_translation(&self, notice: TranslationNotice) -> Result<()>;

    /// Operator-facing message, e.g. the degraded-security warning.
    async fn show_notice(&self, level: NoticeLevel, message: &str) -> Result<()>;
}
