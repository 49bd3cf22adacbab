use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::trace;

use crate::common::command::Command;
use crate::common::config::WebDriverConfig;
use crate::error::{WebDriverError, WebDriverResult};
use crate::http::connection_sync::WebDriverHttpClientSync;
use crate::SessionId;
use crate::WebDriverCommands;

#[derive(Debug)]
pub struct WebDriverSession {
    session_id: SessionId,
    conn: Arc<Mutex<dyn WebDriverHttpClientSync>>,
    config: WebDriverConfig,
}

impl WebDriverSession {
    pub fn new(session_id: SessionId, conn: Arc<Mutex<dyn WebDriverHttpClientSync>>) -> Self {
        Self {
            session_id,
            conn,
            config: WebDriverConfig::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn config(&self) -> &WebDriverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WebDriverConfig {
        &mut self.config
    }

    pub fn execute(&self, command: Command) -> WebDriverResult<serde_json::Value> {
        trace!("session {}: {:?}", self.session_id, command);
        let request = command.format_request(&self.session_id);
        let conn = self.conn.lock().map_err(|_| WebDriverError::LockPoisoned)?;
        conn.execute(request)
    }

    pub fn set_request_timeout(&mut self, timeout: Duration) -> WebDriverResult<()> {
        let mut conn = self.conn.lock().map_err(|_| WebDriverError::LockPoisoned)?;
        conn.set_request_timeout(timeout);
        Ok(())
    }
}

impl WebDriverCommands for WebDriverSession {
    fn session(&self) -> &WebDriverSession {
        self
    }
}
