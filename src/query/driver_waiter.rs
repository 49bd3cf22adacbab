use std::time::Duration;

use stringmatch::Needle;

use crate::alert::Alert;
use crate::common::types::WindowHandle;
use crate::error::WebDriverResult;
use crate::query::{conditions, ConditionWaiter, DriverPredicate, WaitSpec};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// High-level interface for explicit waits on browser state, using the builder pattern.
///
/// # Example:
/// ```no_run
/// # use demoqa_sync::prelude::*;
/// #
/// # fn main() -> WebDriverResult<()> {
/// #     let caps = DesiredCapabilities::chrome();
/// #     let driver = WebDriver::new("http://localhost:4444", &caps)?;
/// #     driver.get("https://demoqa.com/alerts")?;
/// driver.find_element(By::Id("timerAlertButton"))?.click()?;
/// let alert = driver.wait_until().error("Timer alert never opened").alert_is_present()?;
/// alert.accept()?;
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebDriverWaiter<'a> {
    session: &'a WebDriverSession,
    spec: WaitSpec,
    message: String,
    ignore_errors: bool,
}

impl<'a> WebDriverWaiter<'a> {
    fn new(session: &'a WebDriverSession, spec: WaitSpec) -> Self {
        Self {
            session,
            spec,
            message: String::new(),
            ignore_errors: true,
        }
    }

    /// Use the specified WaitSpec for this waiter only.
    pub fn with_spec(mut self, spec: WaitSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Wait up to `timeout`, polling once per `interval`.
    pub fn wait(self, timeout: Duration, interval: Duration) -> WebDriverResult<Self> {
        Ok(self.with_spec(WaitSpec::new(timeout, interval)?))
    }

    /// Provide a human-readable error message to be returned in the case of timeout.
    pub fn error(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    /// By default errors while polling count as "not yet". Set to false to return the first
    /// error instead.
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    fn run<T>(&self, description: &str, f: DriverPredicate<T>) -> WebDriverResult<T> {
        let message = if self.message.is_empty() {
            description
        } else {
            self.message.as_str()
        };
        ConditionWaiter::new(self.spec)
            .ignore_errors(self.ignore_errors)
            .describe(description)
            .until_ok(|| f(self.session))?
            .into_result(message)
    }

    pub fn condition<T>(self, f: DriverPredicate<T>) -> WebDriverResult<T> {
        self.run("custom condition", f)
    }

    /// Wait for an alert to open and return it.
    pub fn alert_is_present(self) -> WebDriverResult<Alert<'a>> {
        self.run("alert to be present", conditions::alert_is_present())?;
        Ok(self.session.switch_to().alert())
    }

    pub fn url_matches<N>(self, needle: N) -> WebDriverResult<String>
    where
        N: Needle + Send + Sync + 'static,
    {
        self.run("url to match", conditions::url_matches(needle))
    }

    pub fn title_matches<N>(self, needle: N) -> WebDriverResult<String>
    where
        N: Needle + Send + Sync + 'static,
    {
        self.run("title to match", conditions::title_matches(needle))
    }

    pub fn number_of_windows_to_be(self, count: usize) -> WebDriverResult<Vec<WindowHandle>> {
        let description = format!("{} windows to be open", count);
        self.run(&description, conditions::number_of_windows_to_be(count))
    }

    /// Wait for a window that is not in `known` and return its handle.
    pub fn new_window_is_opened(self, known: &[WindowHandle]) -> WebDriverResult<WindowHandle> {
        self.run("a new window to open", conditions::new_window_is_opened(known))
    }
}

/// Trait for enabling the WebDriverWaiter interface.
pub trait WebDriverWaitable {
    fn wait_until(&self) -> WebDriverWaiter<'_>;
}

impl<D> WebDriverWaitable for D
where
    D: WebDriverCommands,
{
    /// Return a WebDriverWaiter using the session's default WaitSpec.
    fn wait_until(&self) -> WebDriverWaiter<'_> {
        let session = self.session();
        WebDriverWaiter::new(session, session.config().wait_spec)
    }
}
