use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::common::command::{By, Command};
use crate::common::connection_common::convert_json;
use crate::common::types::{ElementId, ElementRef, MAGIC_ELEMENTID};
use crate::error::{WebDriverError, WebDriverResult};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// Unwrap the raw JSON into a WebElement struct.
pub fn convert_element_sync<'a>(
    session: &'a WebDriverSession,
    value: &serde_json::Value,
) -> WebDriverResult<WebElement<'a>> {
    let elem_id: ElementRef = serde_json::from_value(value.clone())?;
    Ok(WebElement::new(session, ElementId::from(elem_id.id)))
}

/// Unwrap the raw JSON into a Vec of WebElement structs.
pub fn convert_elements_sync<'a>(
    session: &'a WebDriverSession,
    value: &serde_json::Value,
) -> WebDriverResult<Vec<WebElement<'a>>> {
    let values: Vec<ElementRef> = serde_json::from_value(value.clone())?;
    Ok(values.into_iter().map(|x| WebElement::new(session, ElementId::from(x.id))).collect())
}

/// The WebElement struct encapsulates a single element on a page.
///
/// WebElement structs are returned from a `find_element()` operation and borrow the
/// session that found them.
///
/// # Example:
/// ```no_run
/// # use demoqa_sync::prelude::*;
/// #
/// # fn main() -> WebDriverResult<()> {
/// #     let caps = DesiredCapabilities::chrome();
/// #     let driver = WebDriver::new("http://localhost:4444", &caps)?;
/// driver.get("https://demoqa.com/alerts")?;
/// let button = driver.find_element(By::Id("timerAlertButton"))?;
/// button.click()?;
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebElement<'a> {
    pub element_id: ElementId,
    pub(crate) session: &'a WebDriverSession,
}

impl<'a> WebElement<'a> {
    pub fn new(session: &'a WebDriverSession, element_id: ElementId) -> Self {
        WebElement {
            element_id,
            session,
        }
    }

    fn cmd(&self, command: Command) -> WebDriverResult<serde_json::Value> {
        self.session.cmd(command)
    }

    pub fn tag_name(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::GetElementTagName(self.element_id.clone()))?;
        convert_json(&v["value"])
    }

    pub fn text(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::GetElementText(self.element_id.clone()))?;
        convert_json(&v["value"])
    }

    pub fn click(&self) -> WebDriverResult<()> {
        self.cmd(Command::ElementClick(self.element_id.clone()))?;
        Ok(())
    }

    /// Get the specified property. Non-string values are returned as JSON text.
    pub fn get_property(&self, name: &str) -> WebDriverResult<Option<String>> {
        let v = self.cmd(Command::GetElementProperty(self.element_id.clone(), name.to_owned()))?;
        if v["value"].is_null() {
            Ok(None)
        } else if !v["value"].is_string() {
            Ok(Some(v["value"].to_string()))
        } else {
            convert_json(&v["value"]).map(Some)
        }
    }

    pub fn get_attribute(&self, name: &str) -> WebDriverResult<Option<String>> {
        let v = self.cmd(Command::GetElementAttribute(self.element_id.clone(), name.to_owned()))?;
        if !v["value"].is_string() {
            Ok(None)
        } else {
            convert_json(&v["value"]).map(Some)
        }
    }

    pub fn is_displayed(&self) -> WebDriverResult<bool> {
        let v = self.cmd(Command::IsElementDisplayed(self.element_id.clone()))?;
        convert_json(&v["value"])
    }

    pub fn is_enabled(&self) -> WebDriverResult<bool> {
        let v = self.cmd(Command::IsElementEnabled(self.element_id.clone()))?;
        convert_json(&v["value"])
    }

    /// True if the element is still attached to the page.
    pub fn is_present(&self) -> WebDriverResult<bool> {
        match self.tag_name() {
            Ok(_) => Ok(true),
            Err(WebDriverError::NoSuchElement(_)) | Err(WebDriverError::StaleElementReference(_)) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Search for a child element of this WebElement.
    pub fn find_element(&self, by: By) -> WebDriverResult<WebElement<'a>> {
        let v = self
            .cmd(Command::FindElementFromElement(self.element_id.clone(), by.get_w3c_selector()))?;
        convert_element_sync(self.session, &v["value"])
    }
}

impl<'a> fmt::Display for WebElement<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"(session="{}", element="{}")"#, self.session.session_id(), self.element_id)
    }
}

impl<'a> Serialize for WebElement<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(MAGIC_ELEMENTID, &self.element_id.to_string())?;
        map.end()
    }
}
