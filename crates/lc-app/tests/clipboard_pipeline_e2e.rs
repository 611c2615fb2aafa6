//! Copy → monitor → dispatcher → offline engine → history + UI, with only the
//! OS clipboard and the UI replaced by in-memory doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use lc_app::{AppDeps, AppEvent, ClipboardEventForwarder, Orchestrator, TranslationDispatcher};
use lc_core::ports::{
    ActivityLogPort, ClipboardAccessError, ClipboardTextPort, NoticeLevel, TranslationNotice,
    UiPort,
};
use lc_core::settings::{ProviderKind, Settings};
use lc_core::EntryOrigin;
use lc_infra::{
    EncryptedActivityLog, FileSettingsRepository, LineCipher, SystemClock, TranslationEngine,
};
use lc_platform::clipboard::{ClipboardMonitor, MonitorGate, MonitorOptions};
use tempfile::TempDir;
use tokio::sync::{mpsc, watch};

#[derive(Default)]
struct MockClipboard {
    text: Mutex<Option<String>>,
    reads: AtomicUsize,
}

#[async_trait]
impl ClipboardTextPort for MockClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError> {
        let text = self.text.lock().unwrap().clone();
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(text)
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardAccessError> {
        *self.text.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingUi {
    translations: Mutex<Vec<TranslationNotice>>,
}

#[async_trait]
impl UiPort for RecordingUi {
    async fn show_translation(&self, notice: TranslationNotice) -> Result<()> {
        self.translations.lock().unwrap().push(notice);
        Ok(())
    }

    async fn show_notice(&self, _level: NoticeLevel, _message: &str) -> Result<()> {
        Ok(())
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn copied_hello_world_is_translated_recorded_and_shown() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.translation.provider = ProviderKind::Offline;
    settings.translation.src_lang = "auto".into();
    settings.translation.dest_lang = "vi".into();

    let cipher = Arc::new(LineCipher::from_preferences(
        &settings.general.interface_language,
        settings.general.theme.as_str(),
    ));
    let activity_log = Arc::new(EncryptedActivityLog::new(cipher, dir.path()));
    let translator = Arc::new(
        TranslationEngine::from_settings(&settings.translation)
            .await
            .unwrap(),
    );
    let gate = Arc::new(MonitorGate::new(true));
    let clipboard = Arc::new(MockClipboard::default());
    *clipboard.text.lock().unwrap() = Some("copied before start".into());
    let ui = Arc::new(RecordingUi::default());

    let (tx, rx) = mpsc::channel::<AppEvent>(64);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let dispatcher = Arc::new(TranslationDispatcher::new(
        translator.clone(),
        tx.clone(),
        settings.translation.pool_size,
    ));
    let deps = AppDeps {
        translator,
        activity_log: activity_log.clone(),
        settings: Arc::new(FileSettingsRepository::new(dir.path().join("settings.json"))),
        monitor: gate.clone(),
        ui: ui.clone(),
        clock: Arc::new(SystemClock),
    };
    let orchestrator = Orchestrator::new(deps, settings, dispatcher, rx, shutdown_tx);
    let monitor = ClipboardMonitor::new(
        clipboard.clone(),
        Arc::new(ClipboardEventForwarder::new(tx.clone())),
        Arc::new(SystemClock),
        gate.clone(),
        MonitorOptions::default(),
    );

    let orchestrator_task = tokio::spawn(orchestrator.run());
    let monitor_task = tokio::spawn(monitor.run(shutdown_rx));

    // let the monitor take its baseline first
    wait_until(|| clipboard.reads.load(Ordering::SeqCst) > 0).await;
    *clipboard.text.lock().unwrap() = Some("hello world".into());

    wait_until(|| !ui.translations.lock().unwrap().is_empty()).await;

    let notice = ui.translations.lock().unwrap()[0].clone();
    assert_eq!(notice.translated_text, "xin chào thế giới");
    assert_eq!(notice.origin, EntryOrigin::Popup);
    assert!(!notice.is_error);

    let history = activity_log.read_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "hello world");
    assert_eq!(history[0].origin, EntryOrigin::Popup);
    assert_eq!(history[0].src_lang, "en");
    assert_eq!(history[0].dest_lang, "vi");

    // the popup suspends polling until dismissed
    assert!(gate.is_notification_visible());
    tx.send(AppEvent::NotificationDismissed).await.unwrap();
    wait_until(|| !gate.is_notification_visible()).await;

    tx.send(AppEvent::Shutdown).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), orchestrator_task)
        .await
        .unwrap()
        .unwrap();
    tokio::time::timeout(Duration::from_secs(5), monitor_task)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(ui.translations.lock().unwrap().len(), 1);
}
