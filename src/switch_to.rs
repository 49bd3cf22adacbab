use serde::Deserialize;

use crate::alert::Alert;
use crate::common::command::Command;
use crate::common::connection_common::convert_json;
use crate::common::types::WindowHandle;
use crate::error::WebDriverResult;
use crate::WebDriverSession;

#[derive(Debug, Deserialize)]
struct NewWindowResponse {
    handle: WindowHandle,
}

/// Struct for switching between windows and alerts.
#[derive(Debug, Clone)]
pub struct SwitchTo<'a> {
    session: &'a WebDriverSession,
}

impl<'a> SwitchTo<'a> {
    pub fn new(session: &'a WebDriverSession) -> Self {
        SwitchTo {
            session,
        }
    }

    /// Return the currently open alert.
    ///
    /// No command is sent until one of the `Alert` methods is called, so this never fails.
    /// Use `wait_until().alert_is_present()` to wait for an alert to open.
    pub fn alert(self) -> Alert<'a> {
        Alert::new(self.session)
    }

    /// Make the specified window the current browsing context.
    pub fn window(self, handle: &WindowHandle) -> WebDriverResult<()> {
        self.session.execute(Command::SwitchToWindow(handle.clone()))?;
        Ok(())
    }

    /// Open a new top-level window and return its handle.
    ///
    /// The new window does not become current. Pass the handle to `window()` to use it.
    pub fn new_window(self) -> WebDriverResult<WindowHandle> {
        let v = self.session.execute(Command::NewWindow)?;
        let resp: NewWindowResponse = convert_json(&v["value"])?;
        Ok(resp.handle)
    }
}
