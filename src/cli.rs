use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "lingoclip",
    version,
    about = "Translate copied text and keep an encrypted history of it",
    long_about = "Watches the system clipboard, translates newly copied text with the \
                  configured provider and records the results in encrypted history and \
                  favorites logs. Type `help` at the prompt for console commands."
)]
pub struct Cli {
    /// Settings file to use instead of the one in the data directory
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Isolate all data under `lingoclip-<PROFILE>`
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Start with clipboard monitoring paused for this session
    #[arg(long)]
    pub no_monitor: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from([
            "lingoclip",
            "--settings",
            "/tmp/s.json",
            "--profile",
            "work",
            "--no-monitor",
        ]);

        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(cli.profile.as_deref(), Some("work"));
        assert!(cli.no_monitor);
    }

    #[test]
    fn defaults_leave_everything_unset() {
        let cli = Cli::parse_from(["lingoclip"]);

        assert!(cli.settings.is_none());
        assert!(cli.profile.is_none());
        assert!(!cli.no_monitor);
    }
}
