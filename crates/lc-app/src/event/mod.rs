mod app_event;
mod forwarder;

pub use app_event::{AppEvent, TranslationOutcome};
pub use forwarder::ClipboardEventForwarder;
