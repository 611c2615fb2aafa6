use serde::{Deserialize, Serialize};

/// Source language value that asks for detection.
pub const AUTO_LANG: &str = "auto";

/// Detected language for short inputs that mix words of several languages.
pub const MIXED_LANG: &str = "mixed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub src_lang: String,
    pub dest_lang: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        src_lang: impl Into<String>,
        dest_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            src_lang: src_lang.into(),
            dest_lang: dest_lang.into(),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.src_lang.eq_ignore_ascii_case(AUTO_LANG)
    }
}

/// Outcome of a translation.
///
/// Provider failures are folded into this type: `translated_text` then holds
/// a human-readable message and `is_error` is set, so nothing downstream has
/// to handle a provider error separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub translated_text: String,
    /// Detected source language, when the provider reports one.
    pub detected_src_lang: Option<String>,
    pub is_error: bool,
}

impl Translation {
    pub fn ok(translated_text: impl Into<String>, detected_src_lang: Option<String>) -> Self {
        Self {
            translated_text: translated_text.into(),
            detected_src_lang,
            is_error: false,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            translated_text: message.into(),
            detected_src_lang: None,
            is_error: true,
        }
    }

    /// Source language to record: the detected one, else the requested one.
    pub fn effective_src_lang<'a>(&'a self, requested: &'a str) -> &'a str {
        self.detected_src_lang.as_deref().unwrap_or(requested)
    }
}
