use serde_json::{json, Value};

use crate::common::types::{ElementId, SessionId, TimeoutConfiguration, WindowHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Delete,
}

/// A fully formatted request, ready to be sent to the WebDriver server.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestData {
    pub method: RequestMethod,
    pub url: String,
    pub body: Option<Value>,
}

impl RequestData {
    pub fn new<S: Into<String>>(method: RequestMethod, url: S) -> Self {
        RequestData {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn add_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Element locator strategies.
///
/// W3C drivers only understand css, xpath, link text and tag name, so `Id`, `Name` and
/// `ClassName` are translated into CSS selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum By<'a> {
    Id(&'a str),
    XPath(&'a str),
    LinkText(&'a str),
    PartialLinkText(&'a str),
    Name(&'a str),
    Tag(&'a str),
    ClassName(&'a str),
    Css(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub name: String,
    pub query: String,
}

impl Selector {
    fn new(name: &str, query: String) -> Self {
        Selector {
            name: name.to_string(),
            query,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({"using": self.name, "value": self.query})
    }
}

impl<'a> By<'a> {
    pub fn get_w3c_selector(&self) -> Selector {
        match self {
            By::Id(x) => Selector::new("css selector", format!("[id=\"{}\"]", x)),
            By::XPath(x) => Selector::new("xpath", x.to_string()),
            By::LinkText(x) => Selector::new("link text", x.to_string()),
            By::PartialLinkText(x) => Selector::new("partial link text", x.to_string()),
            By::Name(x) => Selector::new("css selector", format!("[name=\"{}\"]", x)),
            By::Tag(x) => Selector::new("tag name", x.to_string()),
            By::ClassName(x) => Selector::new("css selector", format!(".{}", x)),
            By::Css(x) => Selector::new("css selector", x.to_string()),
        }
    }
}

/// The subset of W3C WebDriver endpoints used by this crate.
#[derive(Debug, Clone)]
pub enum Command {
    NewSession(Value),
    DeleteSession,
    SetTimeouts(TimeoutConfiguration),
    NavigateTo(String),
    GetCurrentUrl,
    Refresh,
    GetTitle,
    GetWindowHandle,
    CloseWindow,
    SwitchToWindow(WindowHandle),
    GetWindowHandles,
    NewWindow,
    FindElement(Selector),
    FindElements(Selector),
    FindElementFromElement(ElementId, Selector),
    IsElementDisplayed(ElementId),
    IsElementEnabled(ElementId),
    GetElementAttribute(ElementId, String),
    GetElementProperty(ElementId, String),
    GetElementText(ElementId),
    GetElementTagName(ElementId),
    ElementClick(ElementId),
    ExecuteScript(String, Vec<Value>),
    DismissAlert,
    AcceptAlert,
    GetAlertText,
    SendAlertText(String),
    TakeScreenshot,
}

impl Command {
    pub fn format_request(&self, session_id: &SessionId) -> RequestData {
        let base = format!("/session/{}", session_id);
        match self {
            Command::NewSession(caps) => RequestData::new(RequestMethod::Post, "/session")
                .add_body(json!({
                    "capabilities": {"alwaysMatch": caps},
                    "desiredCapabilities": caps,
                })),
            Command::DeleteSession => RequestData::new(RequestMethod::Delete, base),
            Command::SetTimeouts(timeouts) => {
                RequestData::new(RequestMethod::Post, format!("{}/timeouts", base))
                    .add_body(json!(timeouts))
            }
            Command::NavigateTo(url) => {
                RequestData::new(RequestMethod::Post, format!("{}/url", base))
                    .add_body(json!({ "url": url }))
            }
            Command::GetCurrentUrl => RequestData::new(RequestMethod::Get, format!("{}/url", base)),
            Command::Refresh => RequestData::new(RequestMethod::Post, format!("{}/refresh", base))
                .add_body(json!({})),
            Command::GetTitle => RequestData::new(RequestMethod::Get, format!("{}/title", base)),
            Command::GetWindowHandle => {
                RequestData::new(RequestMethod::Get, format!("{}/window", base))
            }
            Command::CloseWindow => {
                RequestData::new(RequestMethod::Delete, format!("{}/window", base))
            }
            Command::SwitchToWindow(handle) => {
                RequestData::new(RequestMethod::Post, format!("{}/window", base))
                    .add_body(json!({ "handle": handle.as_str() }))
            }
            Command::GetWindowHandles => {
                RequestData::new(RequestMethod::Get, format!("{}/window/handles", base))
            }
            Command::NewWindow => {
                RequestData::new(RequestMethod::Post, format!("{}/window/new", base))
                    .add_body(json!({ "type": "window" }))
            }
            Command::FindElement(selector) => {
                RequestData::new(RequestMethod::Post, format!("{}/element", base))
                    .add_body(selector.to_json())
            }
            Command::FindElements(selector) => {
                RequestData::new(RequestMethod::Post, format!("{}/elements", base))
                    .add_body(selector.to_json())
            }
            Command::FindElementFromElement(element_id, selector) => RequestData::new(
                RequestMethod::Post,
                format!("{}/element/{}/element", base, element_id),
            )
            .add_body(selector.to_json()),
            Command::IsElementDisplayed(element_id) => RequestData::new(
                RequestMethod::Get,
                format!("{}/element/{}/displayed", base, element_id),
            ),
            Command::IsElementEnabled(element_id) => RequestData::new(
                RequestMethod::Get,
                format!("{}/element/{}/enabled", base, element_id),
            ),
            Command::GetElementAttribute(element_id, name) => RequestData::new(
                RequestMethod::Get,
                format!("{}/element/{}/attribute/{}", base, element_id, name),
            ),
            Command::GetElementProperty(element_id, name) => RequestData::new(
                RequestMethod::Get,
                format!("{}/element/{}/property/{}", base, element_id, name),
            ),
            Command::GetElementText(element_id) => RequestData::new(
                RequestMethod::Get,
                format!("{}/element/{}/text", base, element_id),
            ),
            Command::GetElementTagName(element_id) => RequestData::new(
                RequestMethod::Get,
                format!("{}/element/{}/name", base, element_id),
            ),
            Command::ElementClick(element_id) => RequestData::new(
                RequestMethod::Post,
                format!("{}/element/{}/click", base, element_id),
            )
            .add_body(json!({})),
            Command::ExecuteScript(script, args) => {
                RequestData::new(RequestMethod::Post, format!("{}/execute/sync", base))
                    .add_body(json!({"script": script, "args": args}))
            }
            Command::DismissAlert => {
                RequestData::new(RequestMethod::Post, format!("{}/alert/dismiss", base))
                    .add_body(json!({}))
            }
            Command::AcceptAlert => {
                RequestData::new(RequestMethod::Post, format!("{}/alert/accept", base))
                    .add_body(json!({}))
            }
            Command::GetAlertText => {
                RequestData::new(RequestMethod::Get, format!("{}/alert/text", base))
            }
            Command::SendAlertText(text) => {
                RequestData::new(RequestMethod::Post, format!("{}/alert/text", base))
                    .add_body(json!({ "text": text }))
            }
            Command::TakeScreenshot => {
                RequestData::new(RequestMethod::Get, format!("{}/screenshot", base))
            }
        }
    }
}
