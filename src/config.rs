//! Harness configuration, read from environment variables.
//!
//! | Variable                         | Default                 |
//! |----------------------------------|-------------------------|
//! | `WEBDRIVER_URL`                  | `http://localhost:4444` |
//! | `WEBDRIVER_BROWSER`              | `chrome`                |
//! | `WEBDRIVER_HEADLESS`             | `true`                  |
//! | `WEBDRIVER_REQUEST_TIMEOUT_SECS` | `120`                   |
//! | `DEMOQA_BASE_URL`                | `https://demoqa.com`    |
//! | `WAIT_TIMEOUT_SECS`              | `10`                    |
//! | `WAIT_INTERVAL_MS`               | `500`                   |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::info;
use thirtyfour::DesiredCapabilities;
use url::Url;

use crate::error::{WebDriverError, WebDriverResult};
use crate::query::WaitSpec;
use crate::WebDriver;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:4444";
pub const DEFAULT_BASE_URL: &str = "https://demoqa.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

impl FromStr for BrowserKind {
    type Err = WebDriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            other => Err(WebDriverError::InvalidConfig(format!("unsupported browser '{}'", other))),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserKind::Chrome => write!(f, "chrome"),
            BrowserKind::Firefox => write!(f, "firefox"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub server_url: String,
    pub browser: BrowserKind,
    pub headless: bool,
    pub base_url: String,
    pub wait: WaitSpec,
    pub request_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            server_url: DEFAULT_SERVER_URL.to_string(),
            browser: BrowserKind::Chrome,
            headless: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            wait: WaitSpec::default(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> WebDriverResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| WebDriverError::InvalidConfig(format!("{}: cannot parse '{}'", name, value)))
}

fn parse_bool(name: &str, value: &str) -> WebDriverResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(WebDriverError::InvalidConfig(format!(
            "{}: expected a boolean, got '{}'",
            name, value
        ))),
    }
}

fn check_url(name: &str, value: &str) -> WebDriverResult<String> {
    Url::parse(value)
        .map_err(|e| WebDriverError::InvalidConfig(format!("{}: {} ('{}')", name, e, value)))?;
    Ok(value.trim_end_matches('/').to_string())
}

impl HarnessConfig {
    pub fn from_env() -> WebDriverResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> WebDriverResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = HarnessConfig::default();

        if let Some(v) = lookup("WEBDRIVER_URL") {
            config.server_url = check_url("WEBDRIVER_URL", &v)?;
        }
        if let Some(v) = lookup("WEBDRIVER_BROWSER") {
            config.browser = v.parse()?;
        }
        if let Some(v) = lookup("WEBDRIVER_HEADLESS") {
            config.headless = parse_bool("WEBDRIVER_HEADLESS", &v)?;
        }
        if let Some(v) = lookup("WEBDRIVER_REQUEST_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_var("WEBDRIVER_REQUEST_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("DEMOQA_BASE_URL") {
            config.base_url = check_url("DEMOQA_BASE_URL", &v)?;
        }

        let timeout = match lookup("WAIT_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_var("WAIT_TIMEOUT_SECS", &v)?),
            None => config.wait.timeout(),
        };
        let interval = match lookup("WAIT_INTERVAL_MS") {
            Some(v) => Duration::from_millis(parse_var("WAIT_INTERVAL_MS", &v)?),
            None => config.wait.interval(),
        };
        config.wait = WaitSpec::new(timeout, interval)
            .map_err(|e| WebDriverError::InvalidConfig(e.to_string()))?;

        Ok(config)
    }

    /// Capabilities for the configured browser.
    pub fn capabilities(&self) -> WebDriverResult<serde_json::Value> {
        let caps = match self.browser {
            BrowserKind::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if self.headless {
                    caps.set_headless()?;
                    caps.add_chrome_arg("--window-size=1920,1080")?;
                }
                serde_json::to_value(&caps)?
            }
            BrowserKind::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if self.headless {
                    caps.set_headless()?;
                }
                serde_json::to_value(&caps)?
            }
        };
        Ok(caps)
    }

    /// Start a browser session with these settings.
    ///
    /// The session's default wait is set to `self.wait`.
    pub fn connect(&self) -> WebDriverResult<WebDriver> {
        info!("Connecting to {} ({}, headless: {})", self.server_url, self.browser, self.headless);
        let caps = self.capabilities()?;
        let mut driver =
            WebDriver::new_with_timeout(&self.server_url, &caps, Some(self.request_timeout))?;
        driver.config_mut().wait_spec = self.wait;
        Ok(driver)
    }

    /// Absolute URL of a page on the site under test.
    pub fn page_url(&self, path: &str) -> String {
        page_url(&self.base_url, path)
    }
}

pub(crate) fn page_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
