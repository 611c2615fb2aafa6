//! Provider-agnostic translation entry point.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lc_core::ports::TranslatorPort;
use lc_core::settings::{ProviderKind, TranslationSettings};
use lc_core::translation::{detect_language, PhraseTable, MIXED_LANG};
use lc_core::{Translation, TranslationError, TranslationRequest};
use tracing::{debug, info, warn};

use super::google::GoogleProvider;
use super::mymemory::MyMemoryProvider;
use super::offline::{LibreTranslateBackend, ModelBackend, OfflineProvider};
use super::phrases::load_phrase_table;
use super::provider::TranslationProvider;

/// Fronts one [`TranslationProvider`].
///
/// - empty input yields an empty result without calling the provider
/// - `auto` input mixing known words of several languages is translated word
///   by word through the phrase table
/// - provider errors become [`Translation::failure`] with a readable message
pub struct TranslationEngine {
    provider: Arc<dyn TranslationProvider>,
    phrases: Arc<PhraseTable>,
}

impl TranslationEngine {
    pub fn new(provider: Arc<dyn TranslationProvider>, phrases: Arc<PhraseTable>) -> Self {
        Self { provider, phrases }
    }

    /// Build the engine selected by `settings`.
    pub async fn from_settings(settings: &TranslationSettings) -> Result<Self, TranslationError> {
        let phrases = Arc::new(
            load_phrase_table(settings.phrase_table_path.as_deref().map(Path::new)).await,
        );
        let request_timeout = Duration::from_millis(settings.request_timeout_ms.max(1));

        let provider: Arc<dyn TranslationProvider> = match settings.provider {
            ProviderKind::Google => Arc::new(GoogleProvider::new(request_timeout)?),
            ProviderKind::Mymemory => Arc::new(MyMemoryProvider::new(request_timeout)?),
            ProviderKind::Offline => {
                let model_timeout = Duration::from_millis(settings.model_timeout_ms.max(1));
                let model = match settings.model_endpoint.as_deref() {
                    Some(endpoint) if !endpoint.trim().is_empty() => Some(Arc::new(
                        LibreTranslateBackend::new(endpoint, model_timeout)?,
                    )
                        as Arc<dyn ModelBackend>),
                    _ => None,
                };
                Arc::new(OfflineProvider::new(phrases.clone(), model, model_timeout))
            }
        };

        info!(provider = provider.name(), phrases = phrases.len(), "translation engine ready");
        Ok(Self::new(provider, phrases))
    }
}

#[async_trait]
impl TranslatorPort for TranslationEngine {
    async fn translate(&self, request: &TranslationRequest) -> Translation {
        if request.text.trim().is_empty() {
            return Translation::ok("", None);
        }

        if request.is_auto() && detect_language(&request.text).is_mixed() {
            debug!(dest = %request.dest_lang, "mixed-language input, translating word by word");
            let text = self.phrases.translate_words(&request.dest_lang, &request.text);
            return Translation::ok(text, Some(MIXED_LANG.to_string()));
        }

        match self.provider.translate(request).await {
            Ok(translation) => translation,
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    src = %request.src_lang,
                    dest = %request.dest_lang,
                    error = %e,
                    "translation failed"
                );
                Translation::failure(e.user_message())
            }
        }
    }

    fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
