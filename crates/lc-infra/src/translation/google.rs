//! Google Translate free web endpoint (`translate_a/single`, `client=gtx`).

use std::time::Duration;

use async_trait::async_trait;
use lc_core::{Translation, TranslationError, TranslationRequest};
use serde_json::Value;

use super::http::{build_client, ensure_success, map_request_error};
use super::provider::TranslationProvider;

pub const GOOGLE_BASE_URL: &str = "https://translate.googleapis.com";

pub struct GoogleProvider {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GoogleProvider {
    pub fn new(timeout: Duration) -> Result<Self, TranslationError> {
        Self::with_base_url(GOOGLE_BASE_URL, timeout)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

/// The response is a nested array: `[[[translated, original, ...], ...], _, detected, ...]`.
fn parse_response(body: &Value) -> Result<Translation, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Parse("missing segment array".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    if translated.is_empty() {
        return Err(TranslationError::Parse("no translated segments".into()));
    }

    let detected = body.get(2).and_then(Value::as_str).map(str::to_string);
    Ok(Translation::ok(translated, detected))
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslationError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.src_lang.as_str()),
                ("tl", request.dest_lang.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await
            .map_err(|e| map_request_error(e, self.timeout))?;

        let body: Value = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        parse_response(&body)
    }
}
