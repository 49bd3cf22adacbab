use crate::query::WaitSpec;

/// Per-session settings.
#[derive(Debug, Clone, Default)]
pub struct WebDriverConfig {
    /// The wait used by `wait_until()` unless a waiter overrides it.
    pub wait_spec: WaitSpec,
}

impl WebDriverConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
