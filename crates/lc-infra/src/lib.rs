//! # lc-infra
//!
//! Infrastructure adapters for the ports defined in `lc-core`: the per-line
//! cipher, the encrypted append-only log store, the JSON settings file, the
//! translation providers and the system clock.

pub mod security;
pub mod settings;
pub mod storage;
pub mod time;
pub mod translation;

pub use security::{derive_key, LineCipher, LineKey};
pub use settings::FileSettingsRepository;
pub use storage::{EncryptedActivityLog, EncryptedLogStore};
pub use time::SystemClock;
pub use translation::TranslationEngine;
