use chrono::{DateTime, Utc};
use lc_core::{EntryOrigin, Translation, TranslationRequest};

/// Everything the orchestrator reacts to. Producers (monitor, workers, UI)
/// only ever post these; they never touch consumer state directly.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// New, already formatted clipboard text.
    ClipboardChanged {
        text: String,
        observed_at: DateTime<Utc>,
    },
    TranslationFinished(TranslationOutcome),
    /// The monitor-raised result notification was closed.
    NotificationDismissed,
    SetMonitoring(bool),
    /// Translation requested from a UI surface.
    Translate {
        key: String,
        text: String,
        src_lang: String,
        dest_lang: String,
        origin: EntryOrigin,
    },
    Shutdown,
}

/// A completed, non-superseded translation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub job_id: u64,
    pub key: String,
    pub origin: EntryOrigin,
    pub request: TranslationRequest,
    pub translation: Translation,
}
