//! An in-process stand-in for chromedriver that models the two demoqa.com pages.
//!
//! Only the endpoints the crate uses are implemented. The timer alert opens a configurable
//! delay after its button is clicked, and the window button opens a second window on the
//! sample page without switching to it. Navigating detaches every element found so far.

#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use demoqa_sync::prelude::*;
use demoqa_sync::query::WaitSpec;
use serde_json::{json, Value};
use tiny_http::{Header, Method, Response, Server};

pub const SESSION_ID: &str = "fake-session";
pub const SITE_URL: &str = "https://demoqa.test";
pub const ALERT_TEXT: &str = "This alert appeared after 5 seconds";
pub const FIRST_WINDOW: &str = "w-1";
pub const TIMER_BUTTON: &str = "timer-alert-button";
pub const WINDOW_BUTTON: &str = "window-button";
/// First bytes of a PNG file, and their base64 form as served by the screenshot endpoint.
pub const SCREENSHOT_PNG: &[u8] = &[0x89, b'P', b'N', b'G'];
const SCREENSHOT_BASE64: &str = "iVBORw==";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn spec(timeout_ms: u64, interval_ms: u64) -> WaitSpec {
    WaitSpec::new(Duration::from_millis(timeout_ms), Duration::from_millis(interval_ms))
        .expect("valid wait spec")
}

#[derive(Debug, Clone)]
pub struct FakeOptions {
    /// `None` means the alert never opens.
    pub alert_delay: Option<Duration>,
    /// Path the window button opens.
    pub sample_path: String,
    pub buttons_present: bool,
    /// Any button click ends the session, as a browser crash would.
    pub crash_after_click: bool,
    /// The first session delete request fails.
    pub fail_first_delete: bool,
}

impl Default for FakeOptions {
    fn default() -> Self {
        FakeOptions {
            alert_delay: Some(Duration::from_millis(200)),
            sample_path: String::from("/sample"),
            buttons_present: true,
            crash_after_click: false,
            fail_first_delete: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    /// (handle, url) in creation order.
    pub windows: Vec<(String, String)>,
    pub current: Option<String>,
    pub alert_due: Option<Instant>,
    pub alerts_accepted: u32,
    pub sessions_created: u32,
    pub sessions_deleted: u32,
    pub delete_attempts: u32,
    pub scripts: Vec<String>,
    /// The `args` array of each script, in call order.
    pub script_args: Vec<Value>,
    /// Bodies of the timeout requests.
    pub timeouts: Vec<Value>,
    pub refreshes: u32,
    crashed: bool,
    live_elements: Vec<String>,
    next_window: u32,
}

impl FakeState {
    fn alert_open(&self) -> bool {
        self.alert_due.map_or(false, |due| Instant::now() >= due)
    }

    fn current_window_mut(&mut self) -> Option<&mut (String, String)> {
        let current = self.current.clone()?;
        self.windows.iter_mut().find(|(h, _)| *h == current)
    }

    fn current_url(&self) -> Option<String> {
        let current = self.current.as_ref()?;
        self.windows.iter().find(|(h, _)| h == current).map(|(_, url)| url.clone())
    }

    fn open_window(&mut self, url: String) -> String {
        self.next_window += 1;
        let handle = format!("w-{}", self.next_window);
        self.windows.push((handle.clone(), url));
        handle
    }
}

fn success(value: Value) -> (u16, Value) {
    (200, json!({ "value": value }))
}

fn failure(status: u16, error: &str, message: &str) -> (u16, Value) {
    (status, json!({"value": {"error": error, "message": message, "stacktrace": ""}}))
}

fn no_such_window() -> (u16, Value) {
    failure(404, "no such window", "no such window: target window already closed")
}

fn route(
    state: &Mutex<FakeState>,
    options: &FakeOptions,
    method: &Method,
    path: &str,
    body: Value,
) -> (u16, Value) {
    let mut state = state.lock().expect("fake state poisoned");
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (Method::Post, ["session"]) => {
            state.sessions_created += 1;
            state.crashed = false;
            state.live_elements.clear();
            state.windows.clear();
            state.next_window = 0;
            let first = state.open_window(String::from("about:blank"));
            state.current = Some(first);
            success(json!({"sessionId": SESSION_ID, "capabilities": {"browserName": "fake"}}))
        }
        (_, ["session", id, ..]) if *id != SESSION_ID => {
            failure(404, "invalid session id", "unknown session")
        }
        (Method::Delete, ["session", _]) => {
            state.delete_attempts += 1;
            if options.fail_first_delete && state.delete_attempts == 1 {
                return failure(500, "unknown error", "session is busy");
            }
            state.sessions_deleted += 1;
            success(Value::Null)
        }
        _ if state.crashed => {
            failure(404, "invalid session id", "session deleted because of page crash")
        }
        (_, ["session", _, "element", id, _, ..])
            if !state.live_elements.iter().any(|e| e == id) =>
        {
            failure(
                404,
                "stale element reference",
                "stale element reference: element is not attached to the page document",
            )
        }
        (Method::Post, ["session", _, "url"]) => {
            let url = body["url"].as_str().unwrap_or_default().to_string();
            match state.current_window_mut() {
                Some(window) => {
                    window.1 = url;
                    state.live_elements.clear();
                    success(Value::Null)
                }
                None => no_such_window(),
            }
        }
        (Method::Get, ["session", _, "url"]) => match state.current_url() {
            Some(url) => success(json!(url)),
            None => no_such_window(),
        },
        (Method::Get, ["session", _, "title"]) => success(json!("DEMOQA")),
        (Method::Post, ["session", _, "refresh"]) => {
            state.refreshes += 1;
            success(Value::Null)
        }
        (Method::Post, ["session", _, "timeouts"]) => {
            state.timeouts.push(body);
            success(Value::Null)
        }
        (Method::Get, ["session", _, "screenshot"]) => success(json!(SCREENSHOT_BASE64)),
        (Method::Get, ["session", _, "window"]) => match state.current.clone() {
            Some(handle) => success(json!(handle)),
            None => no_such_window(),
        },
        (Method::Get, ["session", _, "window", "handles"]) => {
            let handles: Vec<&String> = state.windows.iter().map(|(h, _)| h).collect();
            success(json!(handles))
        }
        (Method::Post, ["session", _, "window"]) => {
            let handle = body["handle"].as_str().unwrap_or_default().to_string();
            if state.windows.iter().any(|(h, _)| *h == handle) {
                state.current = Some(handle);
                success(Value::Null)
            } else {
                no_such_window()
            }
        }
        (Method::Post, ["session", _, "window", "new"]) => {
            let handle = state.open_window(String::from("about:blank"));
            success(json!({"handle": handle, "type": "window"}))
        }
        (Method::Post, ["session", _, "element"]) => {
            let query = body["value"].as_str().unwrap_or_default();
            let page = state.current_url().unwrap_or_default();
            let found = match query {
                r#"[id="timerAlertButton"]"# if page.ends_with("/alerts") => Some(TIMER_BUTTON),
                r#"[id="windowButton"]"# if page.ends_with("/browser-windows") => {
                    Some(WINDOW_BUTTON)
                }
                _ => None,
            };
            match found.filter(|_| options.buttons_present) {
                Some(id) => {
                    state.live_elements.push(id.to_string());
                    success(json!({ "element-6066-11e4-a52e-4f735466cecf": id }))
                }
                None => failure(404, "no such element", &format!("Unable to locate {}", query)),
            }
        }
        (Method::Post, ["session", _, "element", id, "click"]) => {
            match *id {
                TIMER_BUTTON => {
                    state.alert_due = options.alert_delay.map(|d| Instant::now() + d);
                }
                WINDOW_BUTTON => {
                    let url = format!("{}{}", SITE_URL, options.sample_path);
                    state.open_window(url);
                }
                _ => {}
            }
            if options.crash_after_click {
                state.crashed = true;
            }
            success(Value::Null)
        }
        (Method::Get, ["session", _, "element", _, "name"]) => success(json!("button")),
        (Method::Get, ["session", _, "element", _, "displayed"]) => success(json!(true)),
        (Method::Get, ["session", _, "element", _, "enabled"]) => success(json!(true)),
        (Method::Get, ["session", _, "element", _, "text"]) => success(json!("Click me")),
        (Method::Get, ["session", _, "element", id, "attribute", name]) => {
            match (*id, *name) {
                (TIMER_BUTTON, "id") => success(json!("timerAlertButton")),
                (WINDOW_BUTTON, "id") => success(json!("windowButton")),
                (_, "class") => success(json!("btn btn-primary")),
                _ => success(Value::Null),
            }
        }
        (Method::Get, ["session", _, "element", _, "property", name]) => match *name {
            "disabled" => success(json!(false)),
            "innerText" => success(json!("Click me")),
            _ => success(Value::Null),
        },
        (Method::Post, ["session", _, "element", _, "element"]) => {
            let query = body["value"].as_str().unwrap_or_default();
            failure(404, "no such element", &format!("Unable to locate {}", query))
        }
        (Method::Get, ["session", _, "alert", "text"]) => {
            if state.alert_open() {
                success(json!(ALERT_TEXT))
            } else {
                failure(404, "no such alert", "no such alert")
            }
        }
        (Method::Post, ["session", _, "alert", action]) if *action == "accept" || *action == "dismiss" => {
            if state.alert_open() {
                state.alert_due = None;
                if *action == "accept" {
                    state.alerts_accepted += 1;
                }
                success(Value::Null)
            } else {
                failure(404, "no such alert", "no such alert")
            }
        }
        (Method::Post, ["session", _, "execute", "sync"]) => {
            let script = body["script"].as_str().unwrap_or_default().to_string();
            if script.contains("window.close()") {
                if let Some(current) = state.current.take() {
                    state.windows.retain(|(h, _)| *h != current);
                }
            }
            state.scripts.push(script);
            state.script_args.push(body["args"].clone());
            success(Value::Null)
        }
        _ => failure(404, "unknown command", &format!("{:?} {}", method, path)),
    }
}

pub struct FakeWebDriver {
    server_url: String,
    state: Arc<Mutex<FakeState>>,
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
}

impl FakeWebDriver {
    pub fn start(options: FakeOptions) -> Self {
        init_logging();

        let server = Arc::new(Server::http("127.0.0.1:0").expect("failed to bind fake webdriver"));
        let port = server.server_addr().to_ip().expect("not an ip listener").port();
        let state = Arc::new(Mutex::new(FakeState::default()));

        let thread_server = Arc::clone(&server);
        let thread_state = Arc::clone(&state);
        let handle = thread::spawn(move || {
            for mut request in thread_server.incoming_requests() {
                let mut raw = String::new();
                let _ = request.as_reader().read_to_string(&mut raw);
                let body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);

                let (status, value) =
                    route(&thread_state, &options, request.method(), request.url(), body);

                let header: Header =
                    "Content-Type: application/json".parse().expect("valid header");
                let response = Response::from_string(value.to_string())
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        FakeWebDriver {
            server_url: format!("http://127.0.0.1:{}", port),
            state,
            server,
            handle: Some(handle),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    /// Start a session against this server.
    pub fn connect(&self) -> WebDriver {
        WebDriver::new(&self.server_url, json!({"browserName": "fake"}))
            .expect("failed to start session on fake webdriver")
    }
}

impl Drop for FakeWebDriver {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
