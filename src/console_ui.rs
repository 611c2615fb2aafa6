//! Headless front end: prints translations and notices, reads commands from
//! a line-oriented reader (stdin in the binary).

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use lc_app::{ActivityTrail, AppEvent};
use lc_core::ports::{NoticeLevel, TranslationNotice, UiPort};
use lc_core::EntryOrigin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Printed under popup results; the monitor stays quiet until `dismiss`.
const POPUP_HINT: &str = "  (clipboard monitoring paused, type `dismiss` to resume)";

const HELP: &str = "\
commands:
  translate <text>       translate text with the configured languages
  monitor on|off         resume or pause clipboard monitoring
  dismiss                close the current popup result
  save [note]            add the last translation to favorites
  history                list history, newest last
  favorites              list favorites
  forget <n>             delete history entry n
  unfav <n>              delete favorite n
  note <n> <text>        replace the note of favorite n
  clear history|favorites
  purge                  drop history lines that can no longer be decrypted
  quit";

/// [`UiPort`] that writes to a terminal.
pub struct ConsoleUi {
    out: Mutex<Box<dyn Write + Send>>,
    last_translation: Mutex<Option<TranslationNotice>>,
}

impl ConsoleUi {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
            last_translation: Mutex::new(None),
        }
    }

    pub fn print(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            warn!(error = %e, "console write failed");
        }
    }

    /// Most recent successful translation, the target of `save`.
    pub fn last_translation(&self) -> Option<TranslationNotice> {
        self.last_translation
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl UiPort for ConsoleUi {
    async fn show_translation(&self, notice: TranslationNotice) -> Result<()> {
        let mut text = if notice.is_error {
            format!("[{}] {}", notice.origin.as_str(), notice.translated_text)
        } else {
            format!(
                "[{}] {} → {}\n  {}\n  {}",
                notice.origin.as_str(),
                notice.src_lang,
                notice.dest_lang,
                notice.original_text,
                notice.translated_text
            )
        };
        if notice.origin == EntryOrigin::Popup {
            text.push('\n');
            text.push_str(POPUP_HINT);
        }
        self.print(&text);

        if notice.is_error {
            return Ok(());
        }
        *self
            .last_translation
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(notice);
        Ok(())
    }

    async fn show_notice(&self, level: NoticeLevel, message: &str) -> Result<()> {
        let tag = match level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
        };
        self.print(&format!("[{tag}] {message}"));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Translate(String),
    Monitor(bool),
    Dismiss,
    Save(String),
    History,
    Favorites,
    Forget(usize),
    Unfavorite(usize),
    Note { index: usize, note: String },
    ClearHistory,
    ClearFavorites,
    Purge,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid entry number")]
    InvalidIndex(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, ParseCommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => return Err(ParseCommandError::Empty),
            "translate" | "t" => Self::Translate(required(rest, "translate")?.to_string()),
            "monitor" => match rest {
                "on" => Self::Monitor(true),
                "off" => Self::Monitor(false),
                "" => return Err(ParseCommandError::MissingArgument("monitor")),
                other => return Err(ParseCommandError::Unknown(format!("monitor {other}"))),
            },
            "dismiss" => Self::Dismiss,
            "save" => Self::Save(rest.to_string()),
            "history" => Self::History,
            "favorites" => Self::Favorites,
            "forget" => Self::Forget(index(required(rest, "forget")?)?),
            "unfav" => Self::Unfavorite(index(required(rest, "unfav")?)?),
            "note" => {
                let (n, note) = required(rest, "note")?
                    .split_once(char::is_whitespace)
                    .map(|(n, note)| (n, note.trim()))
                    .unwrap_or((rest, ""));
                Self::Note {
                    index: index(n)?,
                    note: note.to_string(),
                }
            }
            "clear" => match rest {
                "history" => Self::ClearHistory,
                "favorites" => Self::ClearFavorites,
                "" => return Err(ParseCommandError::MissingArgument("clear")),
                other => return Err(ParseCommandError::Unknown(format!("clear {other}"))),
            },
            "purge" => Self::Purge,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn index(s: &str) -> Result<usize, ParseCommandError> {
    s.parse()
        .map_err(|_| ParseCommandError::InvalidIndex(s.to_string()))
}

fn local_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Command loop bound to one activity trail and event queue.
pub struct Console {
    ui: Arc<ConsoleUi>,
    trail: Arc<ActivityTrail>,
    events: mpsc::Sender<AppEvent>,
    src_lang: String,
    dest_lang: String,
}

impl Console {
    pub fn new(
        ui: Arc<ConsoleUi>,
        trail: Arc<ActivityTrail>,
        events: mpsc::Sender<AppEvent>,
        src_lang: impl Into<String>,
        dest_lang: impl Into<String>,
    ) -> Self {
        Self {
            ui,
            trail,
            events,
            src_lang: src_lang.into(),
            dest_lang: dest_lang.into(),
        }
    }

    /// Read commands until `quit`, end of input, or the app goes away.
    /// End of input requests shutdown like `quit` does.
    pub async fn run<R>(self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let command = match ConsoleCommand::parse(&line) {
                Ok(command) => command,
                Err(ParseCommandError::Empty) => continue,
                Err(e) => {
                    self.ui.print(&format!("{e}. Type `help` for commands."));
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(ControlFlow::Break(())) => return Ok(()),
                Ok(ControlFlow::Continue(())) => {}
                Err(e) => self.ui.print(&format!("error: {e:#}")),
            }
        }

        debug!("console input closed");
        self.send(AppEvent::Shutdown).await;
        Ok(())
    }

    pub async fn execute(&self, command: ConsoleCommand) -> Result<ControlFlow<()>> {
        match command {
            ConsoleCommand::Translate(text) => {
                let origin = EntryOrigin::Homepage;
                let event = AppEvent::Translate {
                    key: origin.dispatch_key().to_string(),
                    text,
                    src_lang: self.src_lang.clone(),
                    dest_lang: self.dest_lang.clone(),
                    origin,
                };
                if !self.send(event).await {
                    return Ok(ControlFlow::Break(()));
                }
            }
            ConsoleCommand::Monitor(enabled) => {
                if !self.send(AppEvent::SetMonitoring(enabled)).await {
                    return Ok(ControlFlow::Break(()));
                }
                self.ui.print(if enabled {
                    "monitoring on"
                } else {
                    "monitoring off"
                });
            }
            ConsoleCommand::Dismiss => {
                if !self.send(AppEvent::NotificationDismissed).await {
                    return Ok(ControlFlow::Break(()));
                }
            }
            ConsoleCommand::Save(note) => match self.ui.last_translation() {
                Some(last) => {
                    self.trail
                        .write_favorite(
                            &last.original_text,
                            &last.translated_text,
                            &last.src_lang,
                            &last.dest_lang,
                            &note,
                        )
                        .await?;
                    self.ui.print("saved to favorites");
                }
                None => self.ui.print("nothing to save yet"),
            },
            ConsoleCommand::History => {
                let history = self.trail.read_history().await?;
                if history.is_empty() {
                    self.ui.print("history is empty");
                }
                for (i, entry) in history.iter().enumerate() {
                    self.ui.print(&format!(
                        "{i:>3}  {}  {}→{}  [{}]  {}",
                        local_time(entry.time),
                        entry.src_lang,
                        entry.dest_lang,
                        entry.origin.as_str(),
                        entry.text
                    ));
                }
            }
            ConsoleCommand::Favorites => {
                let favorites = self.trail.read_favorites().await?;
                if favorites.is_empty() {
                    self.ui.print("no favorites");
                }
                for (i, entry) in favorites.iter().enumerate() {
                    let mut line = format!(
                        "{i:>3}  {}  {} → {}",
                        local_time(entry.time),
                        entry.original_text,
                        entry.translated_text
                    );
                    if !entry.note.is_empty() {
                        line.push_str(&format!("  ({})", entry.note));
                    }
                    self.ui.print(&line);
                }
            }
            ConsoleCommand::Forget(i) => {
                let history = self.trail.read_history().await?;
                match history.get(i) {
                    Some(entry) => {
                        let removed = self.trail.delete_history(entry.time, &entry.text).await?;
                        self.ui.print(&format!("removed {removed} history entries"));
                    }
                    None => self.ui.print(&format!("no history entry {i}")),
                }
            }
            ConsoleCommand::Unfavorite(i) => {
                let favorites = self.trail.read_favorites().await?;
                match favorites.get(i) {
                    Some(entry) => {
                        let removed = self
                            .trail
                            .delete_favorite(entry.time, &entry.original_text)
                            .await?;
                        self.ui.print(&format!("removed {removed} favorites"));
                    }
                    None => self.ui.print(&format!("no favorite {i}")),
                }
            }
            ConsoleCommand::Note { index, note } => {
                let favorites = self.trail.read_favorites().await?;
                match favorites.get(index) {
                    Some(entry) => {
                        self.trail.update_favorite_note(entry.time, &note).await?;
                        self.ui.print("note updated");
                    }
                    None => self.ui.print(&format!("no favorite {index}")),
                }
            }
            ConsoleCommand::ClearHistory => {
                self.trail.delete_all_history().await?;
                self.ui.print("history cleared");
            }
            ConsoleCommand::ClearFavorites => {
                self.trail.delete_all_favorites().await?;
                self.ui.print("favorites cleared");
            }
            ConsoleCommand::Purge => {
                let removed = self.trail.purge_unreadable_history().await?;
                self.ui.print(&format!("purged {removed} unreadable lines"));
            }
            ConsoleCommand::Help => self.ui.print(HELP),
            ConsoleCommand::Quit => {
                self.send(AppEvent::Shutdown).await;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Returns false once the orchestrator has stopped.
    async fn send(&self, event: AppEvent) -> bool {
        match self.events.send(event).await {
            Ok(()) => true,
            Err(_) => {
                debug!("event queue closed");
                false
            }
        }
    }
}
