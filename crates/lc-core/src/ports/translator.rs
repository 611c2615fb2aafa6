use async_trait::async_trait;

use crate::translation::{Translation, TranslationRequest};

/// Single translation entry point used by the dispatcher.
///
/// Implementations never fail: provider errors come back as a
/// [`Translation`] with `is_error` set.
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Translation;

    /// Name of the active provider, for logs.
    fn provider_name(&self) -> &str;
}
