use thiserror::Error;

/// Failure of a single translation provider call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("could not parse provider response: {0}")]
    Parse(String),

    #[error("translation timed out after {0} ms")]
    Timeout(u64),

    #[error("unsupported language pair: {src} -> {dest}")]
    Unsupported { src: String, dest: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TranslationError {
    /// Message shown in place of a translation.
    pub fn user_message(&self) -> String {
        match self {
            TranslationError::Network(_) => {
                format!("Translation failed: could not reach the service ({self})")
            }
            TranslationError::Timeout(_) => {
                "Translation failed: the service did not answer in time".to_string()
            }
            other => format!("Translation failed: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_readable() {
        let msg = TranslationError::Timeout(5000).user_message();
        assert!(msg.starts_with("Translation failed"));

        let msg = TranslationError::HttpStatus {
            status: 429,
            message: "Too Many Requests".into(),
        }
        .user_message();
        assert!(msg.contains("429"));
    }
}
