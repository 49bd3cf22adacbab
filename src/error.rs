use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type WebDriverResult<T> = Result<T, WebDriverError>;

/// The error details returned by a W3C WebDriver server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebDriverErrorInfo {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub stacktrace: String,
}

impl fmt::Display for WebDriverErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Deserialize)]
struct WebDriverErrorValue {
    value: WebDriverErrorInfo,
}

#[derive(Debug, Error)]
pub enum WebDriverError {
    #[error("timed out waiting for condition: {0}")]
    Timeout(String),
    #[error("no such element: {0}")]
    NoSuchElement(WebDriverErrorInfo),
    #[error("stale element reference: {0}")]
    StaleElementReference(WebDriverErrorInfo),
    #[error("no such window: {0}")]
    NoSuchWindow(WebDriverErrorInfo),
    #[error("no such alert: {0}")]
    NoSuchAlert(WebDriverErrorInfo),
    #[error("unexpected alert open: {0}")]
    UnexpectedAlertOpen(WebDriverErrorInfo),
    #[error("javascript error: {0}")]
    JavascriptError(WebDriverErrorInfo),
    #[error("session not created: {0}")]
    SessionNotCreated(WebDriverErrorInfo),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("webdriver error {status} ({error}): {message}")]
    UnknownError {
        status: u16,
        error: String,
        message: String,
    },
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to build capabilities: {0}")]
    Capabilities(#[from] thirtyfour::error::WebDriverError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("assertion failed: {0}")]
    AssertionFailed(String),
    #[error("connection lock poisoned")]
    LockPoisoned,
}

impl WebDriverError {
    /// Convert an error response from the WebDriver server into the matching variant.
    ///
    /// Bodies that are not W3C error objects end up as `UnknownError` with the raw body
    /// as the message.
    pub fn parse(status: u16, body: String) -> Self {
        let info = match serde_json::from_str::<WebDriverErrorValue>(&body) {
            Ok(v) => v.value,
            Err(_) => {
                return WebDriverError::UnknownError {
                    status,
                    error: String::from("unknown error"),
                    message: body,
                }
            }
        };

        match info.error.as_str() {
            "no such element" => WebDriverError::NoSuchElement(info),
            "stale element reference" => WebDriverError::StaleElementReference(info),
            "no such window" => WebDriverError::NoSuchWindow(info),
            "no such alert" => WebDriverError::NoSuchAlert(info),
            "unexpected alert open" => WebDriverError::UnexpectedAlertOpen(info),
            "javascript error" => WebDriverError::JavascriptError(info),
            "session not created" => WebDriverError::SessionNotCreated(info),
            "invalid argument" => WebDriverError::InvalidArgument(info.message),
            "timeout" | "script timeout" => WebDriverError::Timeout(info.message),
            _ => WebDriverError::UnknownError {
                status,
                error: info.error,
                message: info.message,
            },
        }
    }

    pub fn is_no_such_alert(&self) -> bool {
        matches!(self, WebDriverError::NoSuchAlert(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, WebDriverError::Timeout(_))
    }
}
