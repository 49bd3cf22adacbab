use crate::common::command::Command;
use crate::common::connection_common::convert_json;
use crate::error::WebDriverResult;
use crate::WebDriverSession;

/// A browser-native alert, confirm or prompt dialog.
///
/// Every method fails with `WebDriverError::NoSuchAlert` when no dialog is open.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    session: &'a WebDriverSession,
}

impl<'a> Alert<'a> {
    pub fn new(session: &'a WebDriverSession) -> Self {
        Alert {
            session,
        }
    }

    /// Get the text of the dialog.
    pub fn text(&self) -> WebDriverResult<String> {
        let v = self.session.execute(Command::GetAlertText)?;
        convert_json(&v["value"])
    }

    /// Dismiss the dialog. This is the same as clicking 'Cancel'.
    pub fn dismiss(&self) -> WebDriverResult<()> {
        self.session.execute(Command::DismissAlert)?;
        Ok(())
    }

    /// Accept the dialog. This is the same as clicking 'OK'.
    pub fn accept(&self) -> WebDriverResult<()> {
        self.session.execute(Command::AcceptAlert)?;
        Ok(())
    }

    /// Type into a prompt dialog.
    pub fn send_keys(&self, text: &str) -> WebDriverResult<()> {
        self.session.execute(Command::SendAlertText(text.to_string()))?;
        Ok(())
    }
}
