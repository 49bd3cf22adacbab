//! A synchronous WebDriver harness for UI-automation tests.
//!
//! The centrepiece is [`ConditionWaiter`](query/struct.ConditionWaiter.html), which polls
//! a predicate at a fixed interval until it yields a value or a deadline passes. Around it
//! sits a thin W3C WebDriver client (sessions, elements, windows, alerts, scripts) and the
//! two demoqa.com scenarios it was written for:
//!
//! - wait for a timer-triggered alert and accept it
//! - open a new window, check its URL, close it and switch back
//!
//! ## Features
//!
//! - Create a browser session via chromedriver, geckodriver or Selenium
//! - Automatically close the browser session on drop
//! - Find elements (via Id, Class, CSS, Tag, XPath, link text)
//! - Switch to window / alert
//! - Execute Javascript
//! - Explicit waits for alerts, windows, URLs and element state
//! - Capture screenshots as PNG
//!
//! ### Example:
//!
//! The following example assumes you have chromedriver running at localhost:4444.
//!
//! ```no_run
//! use demoqa_sync::prelude::*;
//!
//! fn main() -> WebDriverResult<()> {
//!     let caps = DesiredCapabilities::chrome();
//!     let driver = WebDriver::new("http://localhost:4444", &caps)?;
//!
//!     driver.get("https://demoqa.com/alerts")?;
//!     driver.find_element(By::Id("timerAlertButton"))?.click()?;
//!
//!     // Polls every 500ms for up to 10 seconds by default.
//!     let alert = driver.wait_until().alert_is_present()?;
//!     alert.accept()?;
//!
//!     driver.quit()?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::needless_doctest_main)]

pub use common::command::{By, RequestData, RequestMethod};
pub use common::types::*;

pub use alert::Alert;
pub use session::WebDriverSession;
pub use switch_to::SwitchTo;
pub use webdriver::GenericWebDriver;
pub use webdriver::WebDriver;
pub use webdrivercommands::WebDriverCommands;
pub use webelement::WebElement;

pub mod prelude {
    pub use crate::alert::Alert;
    pub use crate::common::command::By;
    pub use crate::common::types::WindowHandle;
    pub use crate::error::{WebDriverError, WebDriverResult};
    pub use crate::query::{
        ConditionResult, ConditionWaiter, ElementWaitable, WaitSpec, WebDriverWaitable,
    };
    pub use crate::switch_to::SwitchTo;
    pub use crate::webdriver::WebDriver;
    pub use crate::webdrivercommands::WebDriverCommands;
    pub use crate::webelement::WebElement;
    pub use thirtyfour::DesiredCapabilities;
}

pub mod common {
    pub mod command;
    pub mod config;
    pub mod connection_common;
    pub mod types;
}
pub mod config;
pub mod error;
pub mod http {
    pub mod connection_sync;
    pub mod reqwest_sync;
}
pub mod query {
    pub mod conditions;
    mod driver_waiter;
    mod element_waiter;
    mod poller;
    mod waiter;

    pub use conditions::{DriverPredicate, ElementPredicate};
    pub use driver_waiter::{WebDriverWaitable, WebDriverWaiter};
    pub use element_waiter::{ElementWaitable, ElementWaiter};
    pub use poller::{PollTicker, WaitSpec, DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};
    pub use waiter::{wait_for, ConditionResult, ConditionWaiter};
}
pub mod scenarios;

mod alert;
mod session;
mod switch_to;
mod webdriver;
mod webdrivercommands;
mod webelement;
