//! Translation domain: request/result models, error taxonomy, language
//! detection and the phrase table used as the offline fast path.

pub mod detect;
mod error;
mod model;
pub mod phrase_table;

pub use detect::{detect_language, Detection};
pub use error::TranslationError;
pub use model::{Translation, TranslationRequest, AUTO_LANG, MIXED_LANG};
pub use phrase_table::{normalize_phrase, PhraseEntry, PhraseTable};
