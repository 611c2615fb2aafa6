use async_trait::async_trait;
use lc_core::{Translation, TranslationError, TranslationRequest};

/// One translation backend. Errors are returned as-is; the engine turns them
/// into displayable results.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn translate(&self, request: &TranslationRequest)
        -> Result<Translation, TranslationError>;
}
