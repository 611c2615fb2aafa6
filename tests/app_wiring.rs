//! Full wiring with the offline provider, a scripted clipboard and the
//! console front end writing into a buffer.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lc_app::AppPaths;
use lc_core::app_dirs::AppDirs;
use lc_core::ports::{ClipboardAccessError, ClipboardTextPort};
use lc_core::settings::{ProviderKind, Settings};
use lc_infra::FileSettingsRepository;
use lingoclip_lib::bootstrap::wiring::wire_app;
use lingoclip_lib::{Console, ConsoleUi};
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedClipboard {
    text: Mutex<Option<String>>,
    reads: AtomicUsize,
}

#[async_trait]
impl ClipboardTextPort for ScriptedClipboard {
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

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
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
async fn copy_save_and_list_through_the_console() {
    let dir = TempDir::new().unwrap();
    let paths = AppPaths::from_app_dirs(&AppDirs {
        app_data_root: dir.path().to_path_buf(),
    });

    let mut settings = Settings::default();
    settings.translation.provider = ProviderKind::Offline;
    settings.translation.dest_lang = "vi".into();

    let clipboard = Arc::new(ScriptedClipboard::default());
    let out = SharedBuf::default();
    let ui = Arc::new(ConsoleUi::with_writer(out.clone()));
    let settings_repo = Arc::new(FileSettingsRepository::new(&paths.settings_path));

    let app = wire_app(
        settings,
        &paths,
        clipboard.clone(),
        ui.clone(),
        settings_repo,
    )
    .await
    .unwrap();

    let console = Console::new(ui.clone(), app.trail.clone(), app.events.clone(), "auto", "vi");
    let trail = app.trail.clone();
    let orchestrator = tokio::spawn(app.orchestrator.run());
    let monitor = tokio::spawn(app.monitor.run(app.shutdown.clone()));

    wait_until(|| clipboard.reads.load(Ordering::SeqCst) > 0).await;
    *clipboard.text.lock().unwrap() = Some("  good morning \n".into());
    wait_until(|| out.text().contains("chào buổi sáng")).await;

    console
        .run(&b"dismiss\nsave morning\nhistory\nfavorites\nquit\n"[..])
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), orchestrator)
        .await
        .unwrap()
        .unwrap();
    tokio::time::timeout(Duration::from_secs(5), monitor)
        .await
        .unwrap()
        .unwrap();

    let history = trail.read_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "good morning");

    let favorites = trail.read_favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].translated_text, "chào buổi sáng");
    assert_eq!(favorites[0].note, "morning");

    let text = out.text();
    assert!(text.contains("[popup] en → vi"));
    assert!(text.contains("good morning → chào buổi sáng  (morning)"));

    let raw = std::fs::read_to_string(paths.activity_dir.join("history.log")).unwrap();
    assert!(!raw.contains("good morning"));
}
