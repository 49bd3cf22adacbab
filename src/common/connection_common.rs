use serde::de::DeserializeOwned;

use crate::error::WebDriverResult;

/// Helper for deserializing the `value` part of a WebDriver response.
pub fn convert_json<T: DeserializeOwned>(value: &serde_json::Value) -> WebDriverResult<T> {
    let v: T = serde_json::from_value(value.clone())?;
    Ok(v)
}

/// Like `convert_json`, but for a list of values.
pub fn convert_json_vec<T: DeserializeOwned>(value: &serde_json::Value) -> WebDriverResult<Vec<T>> {
    let values: Vec<serde_json::Value> = serde_json::from_value(value.clone())?;
    values.iter().map(convert_json).collect()
}
