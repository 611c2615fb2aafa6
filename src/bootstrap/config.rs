//! Settings loading for startup.
//!
//! The repository is strict; startup is not. Any load failure degrades to
//! built-in defaults with a warning so the app always comes up.

use lc_core::ports::SettingsPort;
use lc_core::settings::Settings;
use tracing::{info, warn};

use crate::cli::Cli;

pub async fn load_settings(repo: &dyn SettingsPort) -> Settings {
    match repo.load().await {
        Ok(settings) => {
            info!(
                provider = %settings.translation.provider,
                dest_lang = %settings.translation.dest_lang,
                monitoring = settings.monitor.enabled,
                "settings loaded"
            );
            settings
        }
        Err(e) => {
            warn!(error = %e, "failed to load settings, using defaults");
            Settings::default()
        }
    }
}

/// Session-only overrides from the command line. Never persisted.
pub fn apply_cli_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if cli.no_monitor {
        settings.monitor.enabled = false;
    }
    settings
}
