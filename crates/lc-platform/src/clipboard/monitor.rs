//! Clipboard monitor
//!
//! Polls the OS clipboard at an adaptive interval and reports new text to a
//! [`ClipboardChangeHandler`].
//!
//! ```text
//! Disabled ⇄ Polling → ChangeDetected → (handler) → Polling
//! ```
//!
//! - The interval starts at the configured minimum, is reset on every change
//!   and drifts toward the maximum while the clipboard stays idle
//!   ([`PollSchedule`]).
//! - A read is retried with exponential backoff before the poll counts as
//!   "no text". Too many failed polls in a row trigger an extended pause
//!   ([`FailureTracker`]).
//! - While the [`MonitorGate`] is closed (monitoring disabled, or a result
//!   notification raised by the monitor is visible) the clipboard is not read
//!   at all. When the gate reopens, and at start, the current clipboard text
//!   becomes the baseline without being reported.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lc_core::clipboard::{
    ClipboardSnapshot, FailureTracker, FormatCache, PollConfig, PollSchedule, RetryPolicy,
};
use lc_core::ports::{
    ClipboardAccessError, ClipboardChangeHandler, ClipboardTextPort, ClockPort, MonitorControlPort,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

const FORMAT_CACHE_CAPACITY: usize = 32;

/// Shared on/off switches read by the monitor before every poll.
///
/// 监控开关：全局启用 + 结果通知可见。
#[derive(Debug)]
pub struct MonitorGate {
    enabled: AtomicBool,
    notification_visible: AtomicBool,
}

impl MonitorGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            notification_visible: AtomicBool::new(false),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_notification_visible(&self, visible: bool) {
        self.notification_visible.store(visible, Ordering::SeqCst);
    }

    pub fn is_notification_visible(&self) -> bool {
        self.notification_visible.load(Ordering::SeqCst)
    }

    /// Polling is skipped while this is true.
    pub fn is_suspended(&self) -> bool {
        !self.is_enabled() || self.is_notification_visible()
    }
}

impl MonitorControlPort for MonitorGate {
    fn set_monitoring(&self, enabled: bool) {
        self.set_enabled(enabled);
    }

    fn is_monitoring(&self) -> bool {
        self.is_enabled()
    }

    fn set_notification_visible(&self, visible: bool) {
        MonitorGate::set_notification_visible(self, visible);
    }
}

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub poll: PollConfig,
    pub retry: RetryPolicy,
    pub failure_threshold: u32,
    pub failure_pause: Duration,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            poll: PollConfig::default(),
            retry: RetryPolicy::default(),
            failure_threshold: 10,
            failure_pause: Duration::from_secs(10),
        }
    }
}

pub struct ClipboardMonitor {
    clipboard: Arc<dyn ClipboardTextPort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    clock: Arc<dyn ClockPort>,
    gate: Arc<MonitorGate>,
    schedule: PollSchedule,
    retry: RetryPolicy,
    failures: FailureTracker,
    cache: FormatCache,
    last: Option<ClipboardSnapshot>,
    /// Set while suspended and before the first poll.
    needs_baseline: bool,
}

impl ClipboardMonitor {
    pub fn new(
        clipboard: Arc<dyn ClipboardTextPort>,
        handler: Arc<dyn ClipboardChangeHandler>,
        clock: Arc<dyn ClockPort>,
        gate: Arc<MonitorGate>,
        options: MonitorOptions,
    ) -> Self {
        Self {
            clipboard,
            handler,
            clock,
            gate,
            schedule: PollSchedule::new(options.poll),
            retry: options.retry,
            failures: FailureTracker::new(options.failure_threshold, options.failure_pause),
            cache: FormatCache::new(FORMAT_CACHE_CAPACITY),
            last: None,
            needs_baseline: true,
        }
    }

    pub fn gate(&self) -> Arc<MonitorGate> {
        self.gate.clone()
    }

    pub fn current_interval(&self) -> Duration {
        self.schedule.interval()
    }

    /// Poll until `shutdown` turns true or its sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            min_ms = self.schedule.config().min_interval.as_millis() as u64,
            max_ms = self.schedule.config().max_interval.as_millis() as u64,
            "clipboard monitor started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let delay = self.poll_once().await;

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("clipboard monitor stopped");
    }

    /// Run one poll step and return how long to wait before the next one.
    pub async fn poll_once(&mut self) -> Duration {
        if self.gate.is_suspended() {
            self.needs_baseline = true;
            return self.schedule.interval();
        }

        if self.needs_baseline {
            return self.rebaseline().await;
        }

        let text = match self.read_with_retry().await {
            Ok(text) => {
                self.failures.record_success();
                text
            }
            Err(e) => {
                if let Some(pause) = self.failures.record_failure() {
                    warn!(error = %e, pause_ms = pause.as_millis() as u64, "clipboard keeps failing, pausing monitor");
                    return pause;
                }
                debug!(error = %e, "clipboard read failed, treating poll as empty");
                None
            }
        };

        let text = text.unwrap_or_default();
        if !ClipboardSnapshot::is_change(self.last.as_ref(), &text) {
            return self.schedule.on_idle();
        }

        let observed_at = self.clock.now();
        let formatted = self.cache.format(&text);
        self.last = Some(ClipboardSnapshot::new(text, observed_at));
        let next = self.schedule.on_change();

        if formatted.is_empty() {
            debug!("clipboard change formatted to empty text, ignored");
            return next;
        }

        debug!(chars = formatted.chars().count(), "clipboard change detected");
        if let Err(e) = self
            .handler
            .on_clipboard_changed(ClipboardSnapshot::new(formatted, observed_at))
            .await
        {
            warn!(error = %e, "clipboard change handler failed");
        }
        next
    }

    /// Take the current clipboard text as known, without reporting it.
    async fn rebaseline(&mut self) -> Duration {
        match self.read_with_retry().await {
            Ok(text) => {
                self.failures.record_success();
                self.last = text
                    .filter(|t| !t.trim().is_empty())
                    .map(|t| ClipboardSnapshot::new(t, self.clock.now()));
                self.needs_baseline = false;
                self.schedule.reset();
                debug!(has_text = self.last.is_some(), "clipboard baseline taken");
            }
            Err(e) => {
                if let Some(pause) = self.failures.record_failure() {
                    warn!(error = %e, pause_ms = pause.as_millis() as u64, "clipboard keeps failing, pausing monitor");
                    return pause;
                }
                // retried on the next poll
                debug!(error = %e, "clipboard baseline read failed");
            }
        }
        self.schedule.interval()
    }

    async fn read_with_retry(&self) -> Result<Option<String>, ClipboardAccessError> {
        let mut attempt = 0;
        loop {
            match self.clipboard.read_text().await {
                Ok(text) => return Ok(text),
                Err(e) if attempt + 1 >= self.retry.max_attempts => return Err(e),
                Err(e) => {
                    let delay = self.retry.delay_for(attempt);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying clipboard read");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
