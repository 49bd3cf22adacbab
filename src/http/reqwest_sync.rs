use std::fmt::Debug;
use std::time::Duration;

use log::trace;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::common::command::{RequestData, RequestMethod};
use crate::error::{WebDriverError, WebDriverResult};
use crate::http::connection_sync::{HttpClientCreateParams, WebDriverHttpClientSync};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json;charset=UTF-8"));
    headers
}

/// Synchronous connection to the remote WebDriver server.
#[derive(Debug)]
pub struct ReqwestDriverSync {
    url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl WebDriverHttpClientSync for ReqwestDriverSync {
    fn create(params: HttpClientCreateParams) -> WebDriverResult<Self> {
        let url = params.server_url.trim_end_matches('/').to_owned();
        let headers = build_headers();
        Ok(ReqwestDriverSync {
            url,
            client: reqwest::blocking::Client::builder().default_headers(headers).build()?,
            timeout: params.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }

    /// Set the HTTP client request timeout.
    fn set_request_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Execute the specified command and return the data as serde_json::Value.
    fn execute(&self, request_data: RequestData) -> WebDriverResult<serde_json::Value> {
        let url = self.url.clone() + &request_data.url;
        trace!("{:?} {}", request_data.method, url);
        let mut request = match request_data.method {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self.client.post(&url),
            RequestMethod::Delete => self.client.delete(&url),
        };
        request = request.timeout(self.timeout);

        if let Some(x) = request_data.body {
            request = request.json(&x);
        }

        let resp = request.send()?;

        let status = resp.status().as_u16();
        match status {
            200..=399 => Ok(resp.json()?),
            _ => Err(WebDriverError::parse(status, resp.text()?)),
        }
    }
}
