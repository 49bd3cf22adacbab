use std::time::Duration;

use stringmatch::Needle;

use crate::error::WebDriverResult;
use crate::query::{conditions, ConditionWaiter, ElementPredicate, WaitSpec};
use crate::WebElement;

/// High-level interface for performing explicit waits on an element.
///
/// # Example:
/// ```no_run
/// # use demoqa_sync::prelude::*;
/// #
/// # fn main() -> WebDriverResult<()> {
/// #     let caps = DesiredCapabilities::chrome();
/// #     let driver = WebDriver::new("http://localhost:4444", &caps)?;
/// #     driver.get("https://demoqa.com/browser-windows")?;
/// let button = driver.find_element(By::Id("windowButton"))?;
/// button.wait_until().clickable()?;
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ElementWaiter<'a> {
    element: &'a WebElement<'a>,
    spec: WaitSpec,
    message: String,
    ignore_errors: bool,
}

impl<'a> ElementWaiter<'a> {
    fn new(element: &'a WebElement<'a>, spec: WaitSpec) -> Self {
        Self {
            element,
            spec,
            message: String::new(),
            ignore_errors: true,
        }
    }

    /// Use the specified WaitSpec for this ElementWaiter.
    /// This will not affect the default WaitSpec used for other waits.
    pub fn with_spec(mut self, spec: WaitSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn wait(self, timeout: Duration, interval: Duration) -> WebDriverResult<Self> {
        Ok(self.with_spec(WaitSpec::new(timeout, interval)?))
    }

    /// Provide a human-readable error message to be returned in the case of timeout.
    pub fn error(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    /// By default a waiter will ignore any errors that occur while polling for the desired
    /// condition. Set to false to return early with the first error instead.
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    fn run(&self, description: &str, f: ElementPredicate) -> WebDriverResult<()> {
        let message = if self.message.is_empty() {
            format!("element {} {}", self.element, description)
        } else {
            self.message.clone()
        };
        ConditionWaiter::new(self.spec)
            .ignore_errors(self.ignore_errors)
            .describe(description)
            .until_ok(|| f(self.element).map(|met| if met { Some(()) } else { None }))?
            .into_result(&message)
    }

    pub fn condition(self, f: ElementPredicate) -> WebDriverResult<()> {
        self.run("to meet custom condition", f)
    }

    pub fn stale(self) -> WebDriverResult<()> {
        self.run("to become stale", conditions::element_is_stale())
    }

    pub fn displayed(self) -> WebDriverResult<()> {
        self.run("to be displayed", conditions::element_is_displayed())
    }

    pub fn not_displayed(self) -> WebDriverResult<()> {
        self.run("to be hidden", conditions::element_is_not_displayed())
    }

    pub fn enabled(self) -> WebDriverResult<()> {
        self.run("to be enabled", conditions::element_is_enabled())
    }

    pub fn clickable(self) -> WebDriverResult<()> {
        self.run("to be clickable", conditions::element_is_clickable())
    }

    pub fn has_text<N>(self, text: N) -> WebDriverResult<()>
    where
        N: Needle + Send + Sync + 'static,
    {
        self.run("to have matching text", conditions::element_has_text(text))
    }
}

/// Trait for enabling the ElementWaiter interface.
pub trait ElementWaitable {
    fn wait_until(&self) -> ElementWaiter<'_>;
}

impl ElementWaitable for WebElement<'_> {
    /// Return an ElementWaiter using the session's default WaitSpec.
    fn wait_until(&self) -> ElementWaiter<'_> {
        let spec = self.session.config().wait_spec;
        ElementWaiter::new(self, spec)
    }
}
