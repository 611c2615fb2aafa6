//! Shared reqwest plumbing for the HTTP providers.

use std::time::Duration;

use lc_core::TranslationError;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, TranslationError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("lingoclip/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| TranslationError::Network(e.to_string()))
}

pub(crate) fn map_request_error(err: reqwest::Error, timeout: Duration) -> TranslationError {
    if err.is_timeout() {
        TranslationError::Timeout(timeout.as_millis() as u64)
    } else if err.is_decode() {
        TranslationError::Parse(err.to_string())
    } else {
        TranslationError::Network(err.to_string())
    }
}

/// Fail on a non-2xx status, keeping a short prefix of the body as context.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, TranslationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(200).collect();
    Err(TranslationError::HttpStatus {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.canonical_reason().unwrap_or("error").to_string()
        } else {
            message
        },
    })
}
