use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::common::command::{By, Command};
use crate::common::connection_common::{convert_json, convert_json_vec};
use crate::common::types::{NewSessionResponse, SessionId, TimeoutConfiguration, WindowHandle};
use crate::error::WebDriverResult;
use crate::http::connection_sync::WebDriverHttpClientSync;
use crate::switch_to::SwitchTo;
use crate::webelement::{convert_element_sync, convert_elements_sync};
use crate::{WebDriverSession, WebElement};

/// Start a new WebDriver session, returning the session id and the capabilities JSON
/// reported by the server.
pub fn start_session<C>(
    conn: &dyn WebDriverHttpClientSync,
    capabilities: C,
) -> WebDriverResult<(SessionId, Value)>
where
    C: Serialize,
{
    let caps = serde_json::to_value(capabilities)?;
    let v = conn.execute(Command::NewSession(caps).format_request(&SessionId::from("")))?;
    let resp: NewSessionResponse = convert_json(&v["value"])?;
    info!("Started webdriver session {}", resp.session_id);
    Ok((SessionId::from(resp.session_id), resp.capabilities))
}

/// All browser-level commands, shared by `WebDriver` and `WebDriverSession`.
///
/// Implementors only need to provide `session()`.
pub trait WebDriverCommands {
    fn session(&self) -> &WebDriverSession;

    /// Convenience wrapper for running WebDriver commands.
    fn cmd(&self, command: Command) -> WebDriverResult<Value> {
        self.session().execute(command)
    }

    /// Navigate to the specified URL.
    ///
    /// # Example:
    /// ```no_run
    /// # use demoqa_sync::prelude::*;
    /// #
    /// # fn main() -> WebDriverResult<()> {
    /// #     let caps = DesiredCapabilities::chrome();
    /// #     let driver = WebDriver::new("http://localhost:4444", &caps)?;
    /// driver.get("https://demoqa.com/alerts")?;
    /// #     Ok(())
    /// # }
    /// ```
    fn get<S: Into<String>>(&self, url: S) -> WebDriverResult<()> {
        self.cmd(Command::NavigateTo(url.into()))?;
        Ok(())
    }

    fn current_url(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::GetCurrentUrl)?;
        convert_json(&v["value"])
    }

    fn title(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::GetTitle)?;
        convert_json(&v["value"])
    }

    fn refresh(&self) -> WebDriverResult<()> {
        self.cmd(Command::Refresh)?;
        Ok(())
    }

    /// Find the first element matching the locator.
    ///
    /// Fails with `WebDriverError::NoSuchElement` if nothing matches.
    fn find_element(&self, by: By) -> WebDriverResult<WebElement<'_>> {
        let v = self.cmd(Command::FindElement(by.get_w3c_selector()))?;
        convert_element_sync(self.session(), &v["value"])
    }

    fn find_elements(&self, by: By) -> WebDriverResult<Vec<WebElement<'_>>> {
        let v = self.cmd(Command::FindElements(by.get_w3c_selector()))?;
        convert_elements_sync(self.session(), &v["value"])
    }

    /// Run a synchronous script in the current browsing context.
    fn execute_script(&self, script: &str) -> WebDriverResult<Value> {
        self.execute_script_with_args(script, Vec::new())
    }

    /// Like `execute_script`, with `arguments[n]` bound to `args`. Elements can be passed
    /// with `serde_json::to_value(&elem)`.
    fn execute_script_with_args(&self, script: &str, args: Vec<Value>) -> WebDriverResult<Value> {
        let v = self.cmd(Command::ExecuteScript(script.to_string(), args))?;
        Ok(v["value"].clone())
    }

    fn current_window_handle(&self) -> WebDriverResult<WindowHandle> {
        let v = self.cmd(Command::GetWindowHandle)?;
        convert_json(&v["value"])
    }

    /// All window handles of the session, in the order the driver reports them.
    fn window_handles(&self) -> WebDriverResult<Vec<WindowHandle>> {
        let v = self.cmd(Command::GetWindowHandles)?;
        convert_json_vec(&v["value"])
    }

    /// Close the current window. The session ends when the last window closes.
    fn close_window(&self) -> WebDriverResult<()> {
        self.cmd(Command::CloseWindow)?;
        Ok(())
    }

    fn switch_to(&self) -> SwitchTo<'_> {
        SwitchTo::new(self.session())
    }

    fn set_timeouts(&self, timeouts: TimeoutConfiguration) -> WebDriverResult<()> {
        self.cmd(Command::SetTimeouts(timeouts))?;
        Ok(())
    }

    fn set_implicit_wait_timeout(&self, time_to_wait: Duration) -> WebDriverResult<()> {
        self.set_timeouts(TimeoutConfiguration::new(None, None, Some(time_to_wait)))
    }

    fn set_page_load_timeout(&self, time_to_wait: Duration) -> WebDriverResult<()> {
        self.set_timeouts(TimeoutConfiguration::new(None, Some(time_to_wait), None))
    }

    fn screenshot_as_base64(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::TakeScreenshot)?;
        convert_json(&v["value"])
    }

    fn screenshot_as_png(&self) -> WebDriverResult<Vec<u8>> {
        let s = self.screenshot_as_base64()?;
        let bytes: Vec<u8> = base64::decode(&s)?;
        Ok(bytes)
    }

    /// Take a screenshot of the current window and write it to `path` as PNG.
    fn screenshot(&self, path: &Path) -> WebDriverResult<()> {
        let png = self.screenshot_as_png()?;
        let mut file = File::create(path)?;
        file.write_all(&png)?;
        Ok(())
    }
}
