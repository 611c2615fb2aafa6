//! Offline provider: phrase table, then a local model, then passthrough.
//! 离线翻译：短语表 → 本地模型 → 原文直出。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lc_core::translation::{detect_language, PhraseTable};
use lc_core::{Translation, TranslationError, TranslationRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{build_client, ensure_success, map_request_error};
use super::provider::TranslationProvider;

/// Which tier produced an offline result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflineTier {
    /// Exact phrase-table hit.
    PhraseTable,
    /// Local model answered within the timeout.
    Model,
    /// No model configured; the source text is returned as-is.
    Passthrough,
}

/// Local machine-translation model.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn translate(&self, text: &str, src: &str, dest: &str)
        -> Result<String, TranslationError>;
}

/// A LibreTranslate-compatible HTTP endpoint, typically on localhost.
pub struct LibreTranslateBackend {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslateBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslationError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl ModelBackend for LibreTranslateBackend {
    async fn translate(
        &self,
        text: &str,
        src: &str,
        dest: &str,
    ) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&LibreRequest {
                q: text,
                source: src,
                target: dest,
                format: "text",
            })
            .send()
            .await
            .map_err(|e| map_request_error(e, self.timeout))?;

        let body: LibreResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;
        Ok(body.translated_text)
    }
}

pub struct OfflineProvider {
    phrases: Arc<PhraseTable>,
    model: Option<Arc<dyn ModelBackend>>,
    model_timeout: Duration,
}

impl OfflineProvider {
    pub fn new(
        phrases: Arc<PhraseTable>,
        model: Option<Arc<dyn ModelBackend>>,
        model_timeout: Duration,
    ) -> Self {
        Self {
            phrases,
            model,
            model_timeout,
        }
    }

    /// Run the tiers in order and report which one answered.
    pub async fn resolve(
        &self,
        request: &TranslationRequest,
    ) -> Result<(OfflineTier, Translation), TranslationError> {
        let src = if request.is_auto() {
            detect_language(&request.text).code().to_string()
        } else {
            request.src_lang.to_ascii_lowercase()
        };
        let dest = request.dest_lang.as_str();

        if let Some(hit) = self.phrases.lookup(&src, dest, &request.text) {
            debug!(src = %src, dest, "offline phrase-table hit");
            return Ok((OfflineTier::PhraseTable, Translation::ok(hit, Some(src))));
        }

        let Some(model) = &self.model else {
            return Ok((
                OfflineTier::Passthrough,
                Translation::ok(request.text.clone(), Some(src)),
            ));
        };

        let text = tokio::time::timeout(
            self.model_timeout,
            model.translate(&request.text, &src, dest),
        )
        .await
        .map_err(|_| TranslationError::Timeout(self.model_timeout.as_millis() as u64))??;

        Ok((OfflineTier::Model, Translation::ok(text, Some(src))))
    }
}

#[async_trait]
impl TranslationProvider for OfflineProvider {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslationError> {
        self.resolve(request).await.map(|(_, translation)| translation)
    }
}
