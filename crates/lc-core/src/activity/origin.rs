use serde::{Deserialize, Serialize};

/// UI surface that triggered a translation.
///
/// The value doubles as the dispatcher key for that surface, so a new request
/// from the same surface supersedes the previous one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Floating result popup raised by the clipboard monitor.
    Popup,
    /// Main window translation box.
    Homepage,
}

impl EntryOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryOrigin::Popup => "popup",
            EntryOrigin::Homepage => "homepage",
        }
    }

    /// Dispatcher key used for requests coming from this surface.
    pub fn dispatch_key(&self) -> &'static str {
        self.as_str()
    }
}

impl From<&str> for EntryOrigin {
    /// Maps `"homepage"` to [`EntryOrigin::Homepage`]. Any other value yields
    /// [`EntryOrigin::Popup`].
    fn from(s: &str) -> Self {
        match s {
            "homepage" => EntryOrigin::Homepage,
            _ => EntryOrigin::Popup,
        }
    }
}

impl std::fmt::Display for EntryOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
