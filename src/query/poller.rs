use std::thread;
use std::time::{Duration, Instant};

use crate::error::{WebDriverError, WebDriverResult};

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Timeout and poll interval for a single wait.
///
/// Always satisfies `timeout > 0`, `interval > 0` and `interval <= timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSpec {
    timeout: Duration,
    interval: Duration,
}

impl WaitSpec {
    pub fn new(timeout: Duration, interval: Duration) -> WebDriverResult<Self> {
        if timeout.is_zero() {
            return Err(WebDriverError::InvalidArgument(String::from(
                "wait timeout must be greater than zero",
            )));
        }
        if interval.is_zero() {
            return Err(WebDriverError::InvalidArgument(String::from(
                "poll interval must be greater than zero",
            )));
        }
        if interval > timeout {
            return Err(WebDriverError::InvalidArgument(format!(
                "poll interval ({:?}) must not exceed the timeout ({:?})",
                interval, timeout
            )));
        }
        Ok(WaitSpec {
            timeout,
            interval,
        })
    }

    /// Wait up to `timeout`, polling at the default interval (or at `timeout`, if shorter).
    pub fn with_timeout(timeout: Duration) -> WebDriverResult<Self> {
        Self::new(timeout, DEFAULT_POLL_INTERVAL.min(timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for WaitSpec {
    fn default() -> Self {
        WaitSpec {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Drives the sleep schedule of one wait.
///
/// Polls are due at `start + n * interval`. The last poll is clamped to the deadline, so a
/// condition always gets one final check at the timeout boundary.
#[derive(Debug)]
pub struct PollTicker {
    interval: Duration,
    start: Instant,
    /// `None` when the timeout lies beyond what `Instant` can represent.
    deadline: Option<Instant>,
    cur_tries: u32,
}

impl PollTicker {
    pub fn new(spec: WaitSpec) -> Self {
        let start = Instant::now();
        PollTicker {
            interval: spec.interval(),
            start,
            deadline: start.checked_add(spec.timeout()),
            cur_tries: 0,
        }
    }

    /// Number of completed ticks.
    pub fn tries(&self) -> u32 {
        self.cur_tries
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Sleep until the next poll is due.
    ///
    /// Returns false once the deadline has passed, meaning the caller has already made its
    /// last check.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        if matches!(self.deadline, Some(deadline) if now >= deadline) {
            return false;
        }

        self.cur_tries = self.cur_tries.saturating_add(1);

        // Next poll is due no earlier than this, but never after the deadline.
        let scheduled = self
            .interval
            .checked_mul(self.cur_tries)
            .and_then(|offset| self.start.checked_add(offset));
        let next_due = match (scheduled, self.deadline) {
            (Some(due), Some(deadline)) => Some(due.min(deadline)),
            (Some(due), None) => Some(due),
            (None, deadline) => deadline,
        };
        match next_due {
            Some(due) if due > now => thread::sleep(due - now),
            Some(_) => {}
            None => thread::sleep(self.interval),
        }

        true
    }
}
