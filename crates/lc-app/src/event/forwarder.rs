use anyhow::{anyhow, Result};
use async_trait::async_trait;
use lc_core::clipboard::ClipboardSnapshot;
use lc_core::ports::ClipboardChangeHandler;
use tokio::sync::mpsc;

use super::AppEvent;

/// Turns monitor callbacks into [`AppEvent::ClipboardChanged`] on the queue.
pub struct ClipboardEventForwarder {
    tx: mpsc::Sender<AppEvent>,
}

impl ClipboardEventForwarder {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ClipboardChangeHandler for ClipboardEventForwarder {
    async fn on_clipboard_changed(&self, snapshot: ClipboardSnapshot) -> Result<()> {
        self.tx
            .send(AppEvent::ClipboardChanged {
                text: snapshot.text,
                observed_at: snapshot.observed_at,
            })
            .await
            .map_err(|_| anyhow!("event queue closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn forwards_snapshot_as_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let forwarder = ClipboardEventForwarder::new(tx);

        forwarder
            .on_clipboard_changed(ClipboardSnapshot::new("hello", Utc::now()))
            .await
            .unwrap();

        match rx.recv().await {
            Some(AppEvent::ClipboardChanged { text, .. }) => assert_eq!(text, "hello"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_queue_is_an_error() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let forwarder = ClipboardEventForwarder::new(tx);

        let result = forwarder
            .on_clipboard_changed(ClipboardSnapshot::new("hello", Utc::now()))
            .await;

        assert!(result.is_err());
    }
}
