//! MyMemory REST API (`/get?q=..&langpair=src|dest`).

use std::time::Duration;

use async_trait::async_trait;
use lc_core::translation::detect_language;
use lc_core::{Translation, TranslationError, TranslationRequest};
use serde::Deserialize;

use super::http::{build_client, ensure_success, map_request_error};
use super::provider::TranslationProvider;

pub const MYMEMORY_BASE_URL: &str = "https://api.mymemory.translated.net";

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    #[serde(rename = "responseStatus", default)]
    response_status: Option<serde_json::Value>,
    #[serde(rename = "responseDetails", default)]
    response_details: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

pub struct MyMemoryProvider {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl MyMemoryProvider {
    pub fn new(timeout: Duration) -> Result<Self, TranslationError> {
        Self::with_base_url(MYMEMORY_BASE_URL, timeout)
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

/// `responseStatus` arrives as a number or a numeric string.
fn status_code(value: &Option<serde_json::Value>) -> u16 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(200) as u16,
        Some(serde_json::Value::String(s)) => s.parse().unwrap_or(200),
        _ => 200,
    }
}

fn parse_response(body: MyMemoryResponse, src: &str) -> Result<Translation, TranslationError> {
    let status = status_code(&body.response_status);
    if status != 200 {
        let message = match body.response_details {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "request rejected".to_string(),
        };
        return Err(TranslationError::HttpStatus { status, message });
    }

    let text = body
        .response_data
        .and_then(|d| d.translated_text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| TranslationError::Parse("missing responseData.translatedText".into()))?;

    Ok(Translation::ok(text, Some(src.to_string())))
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslationError> {
        // MyMemory has no auto-detection.
        let src = if request.is_auto() {
            detect_language(&request.text).code().to_string()
        } else {
            request.src_lang.clone()
        };
        let langpair = format!("{src}|{}", request.dest_lang);

        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[("q", request.text.as_str()), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| map_request_error(e, self.timeout))?;

        let body: MyMemoryResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        parse_response(body, &src)
    }
}
