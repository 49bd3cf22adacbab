use log::{debug, warn};

use crate::error::{WebDriverError, WebDriverResult};
use crate::query::{PollTicker, WaitSpec};

/// Outcome of a single wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionResult<T> {
    Success(T),
    TimedOut,
}

impl<T> ConditionResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ConditionResult::Success(_))
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, ConditionResult::TimedOut)
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ConditionResult::Success(v) => Some(v),
            ConditionResult::TimedOut => None,
        }
    }

    /// Treat a timeout as an error, using `message` to describe what was being waited for.
    pub fn into_result(self, message: &str) -> WebDriverResult<T> {
        match self {
            ConditionResult::Success(v) => Ok(v),
            ConditionResult::TimedOut => Err(WebDriverError::Timeout(message.to_string())),
        }
    }
}

/// Polls a predicate until it yields a value or the wait times out.
///
/// The first check happens immediately. After that the predicate is checked once per
/// interval, with a final check exactly at the deadline.
///
/// # Example:
/// ```rust
/// use demoqa_sync::query::{ConditionWaiter, WaitSpec};
/// use std::time::{Duration, Instant};
///
/// let spec = WaitSpec::new(Duration::from_millis(500), Duration::from_millis(10)).unwrap();
/// let ready_at = Instant::now() + Duration::from_millis(50);
/// let result = ConditionWaiter::new(spec).until(|| {
///     if Instant::now() >= ready_at {
///         Some("ready")
///     } else {
///         None
///     }
/// });
/// assert_eq!(result.ok(), Some("ready"));
/// ```
#[derive(Debug, Clone)]
pub struct ConditionWaiter {
    spec: WaitSpec,
    ignore_errors: bool,
    description: String,
}

impl ConditionWaiter {
    pub fn new(spec: WaitSpec) -> Self {
        ConditionWaiter {
            spec,
            ignore_errors: true,
            description: String::from("condition"),
        }
    }

    /// By default errors returned by a fallible predicate are treated as "not yet".
    /// Set this to false to stop waiting and return the first error instead.
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    /// Name the condition in log output.
    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn spec(&self) -> WaitSpec {
        self.spec
    }

    pub fn until<T, F>(&self, mut predicate: F) -> ConditionResult<T>
    where
        F: FnMut() -> Option<T>,
    {
        debug!("Waiting up to {:?} for {}", self.spec.timeout(), self.description);
        let mut ticker = PollTicker::new(self.spec);
        loop {
            if let Some(v) = predicate() {
                self.log_success(&ticker);
                return ConditionResult::Success(v);
            }

            if !ticker.tick() {
                self.log_timeout(&ticker);
                return ConditionResult::TimedOut;
            }
        }
    }

    pub fn until_ok<T, F>(&self, mut predicate: F) -> WebDriverResult<ConditionResult<T>>
    where
        F: FnMut() -> WebDriverResult<Option<T>>,
    {
        debug!("Waiting up to {:?} for {}", self.spec.timeout(), self.description);
        let mut ticker = PollTicker::new(self.spec);
        loop {
            match predicate() {
                Ok(Some(v)) => {
                    self.log_success(&ticker);
                    return Ok(ConditionResult::Success(v));
                }
                Ok(None) => {}
                Err(e) if self.ignore_errors => {
                    debug!("Ignoring error while waiting for {}: {}", self.description, e);
                }
                Err(e) => return Err(e),
            }

            if !ticker.tick() {
                self.log_timeout(&ticker);
                return Ok(ConditionResult::TimedOut);
            }
        }
    }

    fn log_success(&self, ticker: &PollTicker) {
        debug!(
            "{} met after {:?} ({} polls)",
            self.description,
            ticker.elapsed(),
            ticker.tries() + 1
        );
    }

    fn log_timeout(&self, ticker: &PollTicker) {
        warn!(
            "Timed out after {:?} waiting for {} ({} polls)",
            ticker.elapsed(),
            self.description,
            ticker.tries() + 1
        );
    }
}

/// Shorthand for `ConditionWaiter::new(spec).until(predicate)`.
pub fn wait_for<T, F>(spec: WaitSpec, predicate: F) -> ConditionResult<T>
where
    F: FnMut() -> Option<T>,
{
    ConditionWaiter::new(spec).until(predicate)
}
