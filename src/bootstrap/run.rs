use std::sync::Arc;

use anyhow::Context;
use lc_app::{AppEvent, AppPaths};
use lc_core::ports::AppDirsPort;
use lc_infra::FileSettingsRepository;
use lc_platform::{DataDirLocator, SystemClipboard};
use tokio::io::BufReader;
use tracing::{error, info, warn};

use super::config::{apply_cli_overrides, load_settings};
use super::tracing::init_tracing_subscriber;
use super::wiring::{wire_app, WiringError};
use crate::cli::Cli;
use crate::console_ui::{Console, ConsoleUi};

/// Run the app until the console quits, stdin closes or Ctrl-C arrives.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let profile = cli.profile.clone().or_else(|| std::env::var("LC_PROFILE").ok());
    let paths = DataDirLocator::for_profile(profile.as_deref())
        .get_app_dirs()
        .map(|dirs| AppPaths::from_app_dirs(&dirs))
        .map_err(|e| WiringError::AppDirs(e.to_string()));

    if let Err(e) = init_tracing_subscriber(paths.as_ref().ok().map(|p| p.logs_dir.as_path())) {
        eprintln!("Failed to initialize tracing: {e}");
    }
    let paths = paths?;

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| paths.settings_path.clone());
    info!(
        version = env!("CARGO_PKG_VERSION"),
        settings = %settings_path.display(),
        "starting lingoclip"
    );

    let settings_repo = Arc::new(FileSettingsRepository::new(settings_path));
    let settings = apply_cli_overrides(load_settings(settings_repo.as_ref()).await, &cli);

    let clipboard = SystemClipboard::new()
        .map_err(|e| WiringError::ClipboardInit(e.to_string()))
        .context("cannot access the system clipboard")?;
    let ui = Arc::new(ConsoleUi::stdout());

    let src_lang = settings.translation.src_lang.clone();
    let dest_lang = settings.translation.dest_lang.clone();
    let app = wire_app(
        settings,
        &paths,
        Arc::new(clipboard),
        ui.clone(),
        settings_repo,
    )
    .await
    .context("failed to wire application")?;

    let console = Console::new(ui.clone(), app.trail.clone(), app.events.clone(), src_lang, dest_lang);
    ui.print("lingoclip is running. Copy some text, or type `help`.");

    let mut orchestrator = tokio::spawn(app.orchestrator.run());
    let monitor = tokio::spawn(app.monitor.run(app.shutdown.clone()));
    let console = tokio::spawn(async move {
        if let Err(e) = console.run(BufReader::new(tokio::io::stdin())).await {
            warn!(error = %e, "console input failed");
        }
    });

    tokio::select! {
        res = &mut orchestrator => {
            if let Err(e) = res {
                error!(error = %e, "orchestrator task failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            if app.events.send(AppEvent::Shutdown).await.is_ok() {
                if let Err(e) = orchestrator.await {
                    error!(error = %e, "orchestrator task failed");
                }
            }
        }
    }

    // A pending stdin read cannot be cancelled; main bounds the runtime shutdown.
    console.abort();
    if let Err(e) = monitor.await {
        error!(error = %e, "clipboard monitor task failed");
    }

    info!("lingoclip stopped");
    Ok(())
}
