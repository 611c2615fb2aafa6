//! Dependency assembly.
//!
//! The only place that depends on lc-infra, lc-platform and lc-app together.
//! It builds adapters and hands them over as ports; it makes no runtime
//! decisions of its own.

use std::sync::Arc;

use lc_app::{
    ActivityTrail, AppDeps, AppEvent, AppPaths, ClipboardEventForwarder, Orchestrator,
    TranslationDispatcher,
};
use lc_core::clipboard::PollConfig;
use lc_core::ports::{ClipboardTextPort, ClockPort, SettingsPort, TranslatorPort, UiPort};
use lc_core::settings::Settings;
use lc_infra::{EncryptedActivityLog, LineCipher, SystemClock, TranslationEngine};
use lc_platform::clipboard::{ClipboardMonitor, MonitorGate, MonitorOptions};
use tokio::sync::{mpsc, watch};
use tracing::info;

/// Capacity of the orchestrator's event queue.
const EVENT_QUEUE_CAPACITY: usize = 256;

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),

    #[error("Translator initialization failed: {0}")]
    TranslatorInit(String),

    #[error("App directory resolution failed: {0}")]
    AppDirs(String),
}

/// Everything `run` needs to start the app's tasks.
pub struct WiredApp {
    pub orchestrator: Orchestrator,
    pub monitor: ClipboardMonitor,
    pub events: mpsc::Sender<AppEvent>,
    pub shutdown: watch::Receiver<bool>,
    pub trail: Arc<ActivityTrail>,
}

pub fn monitor_options(settings: &Settings) -> MonitorOptions {
    MonitorOptions {
        poll: PollConfig::with_bounds(
            settings.monitor.min_interval(),
            settings.monitor.max_interval(),
        ),
        ..MonitorOptions::default()
    }
}

pub async fn build_translator(settings: &Settings) -> WiringResult<Arc<dyn TranslatorPort>> {
    let engine = TranslationEngine::from_settings(&settings.translation)
        .await
        .map_err(|e| WiringError::TranslatorInit(e.to_string()))?;
    Ok(Arc::new(engine))
}

/// Wire the full pipeline around the given clipboard, UI and settings store.
pub async fn wire_app(
    settings: Settings,
    paths: &AppPaths,
    clipboard: Arc<dyn ClipboardTextPort>,
    ui: Arc<dyn UiPort>,
    settings_repo: Arc<dyn SettingsPort>,
) -> WiringResult<WiredApp> {
    let translator = build_translator(&settings).await?;

    // Key material is the two preference strings; changing either makes
    // older lines unreadable.
    let cipher = Arc::new(LineCipher::from_preferences(
        &settings.general.interface_language,
        settings.general.theme.as_str(),
    ));
    let activity_log = Arc::new(EncryptedActivityLog::new(
        cipher,
        paths.activity_dir.clone(),
    ));
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let gate = Arc::new(MonitorGate::new(settings.monitor.enabled));

    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let dispatcher = Arc::new(TranslationDispatcher::new(
        translator.clone(),
        events_tx.clone(),
        settings.translation.pool_size,
    ));

    let monitor = ClipboardMonitor::new(
        clipboard,
        Arc::new(ClipboardEventForwarder::new(events_tx.clone())),
        clock.clone(),
        gate.clone(),
        monitor_options(&settings),
    );

    let deps = AppDeps {
        translator,
        activity_log,
        settings: settings_repo,
        monitor: gate.clone(),
        ui,
        clock,
    };

    info!(
        activity_dir = %paths.activity_dir.display(),
        pool_size = settings.translation.pool_size,
        min_interval_ms = settings.monitor.min_interval_ms,
        max_interval_ms = settings.monitor.max_interval_ms,
        "dependencies wired"
    );

    let orchestrator = Orchestrator::new(deps, settings, dispatcher, events_rx, shutdown_tx);
    let trail = orchestrator.activity_trail();

    Ok(WiredApp {
        orchestrator,
        monitor,
        events: events_tx,
        shutdown: shutdown_rx,
        trail,
    })
}
