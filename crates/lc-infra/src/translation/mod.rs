//! Translation providers and the engine that fronts them.

mod engine;
mod google;
mod http;
mod mymemory;
mod offline;
mod phrases;
mod provider;

pub use engine::TranslationEngine;
pub use google::GoogleProvider;
pub use mymemory::MyMemoryProvider;
pub use offline::{LibreTranslateBackend, ModelBackend, OfflineProvider, OfflineTier};
pub use phrases::load_phrase_table;
pub use provider::TranslationProvider;
