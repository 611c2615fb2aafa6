//! Adaptive poll scheduling and failure backoff for the clipboard monitor.
//!
//! These types hold no clock. The monitor feeds them what happened on each
//! poll and sleeps for whatever they return, which keeps the timing policy
//! testable without a runtime.

use std::time::Duration;

const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(2);
const IDLE_NUDGE_AFTER: Duration = Duration::from_secs(10);
const IDLE_GROW_AFTER: Duration = Duration::from_secs(30);
const NUDGE_STEP: Duration = Duration::from_millis(100);
const GROWTH_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    pub min_interval: Duration,
    pub max_interval: Duration,
    /// Idle time after which the interval is nudged up by `nudge_step`.
    pub idle_nudge_after: Duration,
    /// Idle time after which the interval grows by `growth_factor`.
    pub idle_grow_after: Duration,
    pub nudge_step: Duration,
    pub growth_factor: f64,
}

impl PollConfig {
    /// Build a config from interval bounds, keeping the default idle thresholds.
    ///
    /// A zero minimum falls back to the default minimum and a maximum below the
    /// minimum is raised to it.
    pub fn with_bounds(min_interval: Duration, max_interval: Duration) -> Self {
        let min_interval = if min_interval.is_zero() {
            DEFAULT_MIN_INTERVAL
        } else {
            min_interval
        };
        Self {
            min_interval,
            max_interval: max_interval.max(min_interval),
            ..Self::default()
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
            max_interval: DEFAULT_MAX_INTERVAL,
            idle_nudge_after: IDLE_NUDGE_AFTER,
            idle_grow_after: IDLE_GROW_AFTER,
            nudge_step: NUDGE_STEP,
            growth_factor: GROWTH_FACTOR,
        }
    }
}

/// Current poll interval plus the idle time accumulated since the last change.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    config: PollConfig,
    interval: Duration,
    idle: Duration,
}

impl PollSchedule {
    pub fn new(config: PollConfig) -> Self {
        let interval = config.min_interval;
        Self {
            config,
            interval,
            idle: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn idle_time(&self) -> Duration {
        self.idle
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// A change was detected: back to the fastest rate.
    pub fn on_change(&mut self) -> Duration {
        self.reset();
        self.interval
    }

    /// A poll completed without change. The interval that was just slept is
    /// added to the idle time before the next interval is chosen.
    pub fn on_idle(&mut self) -> Duration {
        self.idle = self.idle.saturating_add(self.interval);

        let max = self.config.max_interval;
        if self.idle > self.config.idle_grow_after {
            self.interval = self
                .interval
                .mul_f64(self.config.growth_factor.max(1.0))
                .min(max);
        } else if self.idle > self.config.idle_nudge_after {
            self.interval = (self.interval + self.config.nudge_step).min(max);
        }
        self.interval
    }

    pub fn reset(&mut self) {
        self.interval = self.config.min_interval;
        self.idle = Duration::ZERO;
    }
}

/// Short exponential backoff for a single clipboard read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): base, 2×base, 4×base…
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
        }
    }
}

/// Counts consecutive failed polls and asks for an extended pause once the
/// threshold is reached.
#[derive(Debug, Clone)]
pub struct FailureTracker {
    consecutive: u32,
    threshold: u32,
    pause: Duration,
}

impl FailureTracker {
    pub fn new(threshold: u32, pause: Duration) -> Self {
        Self {
            consecutive: 0,
            threshold: threshold.max(1),
            pause,
        }
    }

    /// Record a failed poll. Returns the pause to take when the threshold is
    /// reached; the counter restarts from zero afterwards.
    pub fn record_failure(&mut self) -> Option<Duration> {
        self.consecutive += 1;
        if self.consecutive >= self.threshold {
            self.consecutive = 0;
            Some(self.pause)
        } else {
            None
        }
    }

    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }
}

impl Default for FailureTracker {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(10))
    }
}
