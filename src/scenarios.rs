//! The demoqa.com alert and window flows.
//!
//! Both scenarios accept any `WebDriverCommands` implementor and propagate driver errors
//! unchanged, including errors raised while polling. Only the waits and the URL check
//! produce errors of their own.

use log::info;
use url::Url;

use crate::common::command::By;
use crate::config::page_url;
use crate::error::{WebDriverError, WebDriverResult};
use crate::query::{ConditionWaiter, WaitSpec, WebDriverWaitable};
use crate::webdrivercommands::WebDriverCommands;

pub const ALERTS_PATH: &str = "alerts";
pub const BROWSER_WINDOWS_PATH: &str = "browser-windows";
pub const SAMPLE_PATH: &str = "sample";

/// Click the timer alert button, wait for the alert and accept it.
///
/// Returns the alert text.
pub fn wait_for_timer_alert<D>(
    driver: &D,
    base_url: &str,
    spec: WaitSpec,
) -> WebDriverResult<String>
where
    D: WebDriverCommands,
{
    driver.get(page_url(base_url, ALERTS_PATH))?;

    let button = driver.find_element(By::Id("timerAlertButton"))?;
    button.click()?;

    let alert = driver
        .wait_until()
        .with_spec(spec)
        .error("timer alert did not appear")
        .ignore_errors(false)
        .alert_is_present()?;
    let text = alert.text()?;
    alert.accept()?;

    info!("Accepted alert: {}", text);
    Ok(text)
}

fn parse_url(value: &str) -> WebDriverResult<Url> {
    Url::parse(value).map_err(|e| WebDriverError::InvalidArgument(format!("{}: {}", value, e)))
}

/// Open the sample page in a new window, check its URL, close it and switch back.
///
/// Returns the URL of the new window.
pub fn pass_between_windows<D>(
    driver: &D,
    base_url: &str,
    spec: WaitSpec,
) -> WebDriverResult<String>
where
    D: WebDriverCommands,
{
    driver.get(page_url(base_url, BROWSER_WINDOWS_PATH))?;

    let button = driver.find_element(By::Id("windowButton"))?;
    let original = driver.current_window_handle()?;
    let known = driver.window_handles()?;

    button.click()?;

    let new_window = driver
        .wait_until()
        .with_spec(spec)
        .error("sample window did not open")
        .ignore_errors(false)
        .new_window_is_opened(&known)?;
    driver.switch_to().window(&new_window)?;

    // A fresh window reports about:blank until its first navigation commits.
    let loaded = ConditionWaiter::new(spec)
        .ignore_errors(false)
        .describe("sample page to load")
        .until_ok(|| {
            let url = driver.current_url()?;
            Ok(if url.starts_with("about:") { None } else { Some(url) })
        })?;
    let actual = match loaded.ok() {
        Some(url) => url,
        None => driver.current_url()?,
    };

    let expected = parse_url(&page_url(base_url, SAMPLE_PATH))?;
    let actual = parse_url(&actual)?;
    if actual != expected {
        return Err(WebDriverError::AssertionFailed(format!(
            "new window url: expected {}, found {}",
            expected, actual
        )));
    }

    driver.execute_script("window.close();")?;
    driver.switch_to().window(&original)?;

    info!("Visited {} in window {} and returned", actual, new_window);
    Ok(actual.into())
}
