//! # lc-app
//!
//! Application layer: wires clipboard changes to translations, translations
//! to the activity trail and the UI, and owns the single consumer loop that
//! applies every result.

pub mod app_paths;
pub mod deps;
pub mod dispatcher;
pub mod event;
pub mod orchestrator;
pub mod usecases;

pub use app_paths::AppPaths;
pub use deps::AppDeps;
pub use dispatcher::{DispatchError, TranslationDispatcher, TranslationHandle, TranslationJob};
pub use event::{AppEvent, ClipboardEventForwarder, TranslationOutcome};
pub use orchestrator::Orchestrator;
pub use usecases::ActivityTrail;
