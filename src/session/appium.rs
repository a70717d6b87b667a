//! Session introspector boundary: a synchronous client for an
//! Appium-compatible automation server. The engine core never talks to
//! the network; only these collaborators do.

use std::fs::File;
use std::process::{Command, Stdio};
use std::time::Duration;

use serde_json::Value;

use crate::error::EngineError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:4723";

const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(1);
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AppiumClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl AppiumClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Quick liveness probe against `/status`.
    pub fn server_status(&self) -> bool {
        self.client
            .get(format!("{}/status", self.endpoint))
            .timeout(STATUS_PROBE_TIMEOUT)
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Ids of the sessions the server currently holds.
    pub fn active_sessions(&self) -> Result<Vec<String>, EngineError> {
        let body: Value = self
            .client
            .get(format!("{}/sessions", self.endpoint))
            .timeout(STATUS_PROBE_TIMEOUT)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.unavailable(e))?
            .json()
            .map_err(|e| self.unavailable(e))?;

        let sessions = body["value"]
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|s| s["id"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(sessions)
    }

    /// Fetch the current hierarchy dump for a session, as JSON text.
    ///
    /// The server wraps responses in the WebDriver `{"value": ...}`
    /// envelope; the value may be a serialized string or the tree itself.
    pub fn fetch_page_source(&self, session_id: &str) -> Result<String, EngineError> {
        let body: Value = self
            .client
            .get(format!(
                "{}/session/{}/source?format=json",
                self.endpoint, session_id
            ))
            .timeout(FETCH_TIMEOUT)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.unavailable(e))?
            .json()
            .map_err(|e| self.unavailable(e))?;

        match &body["value"] {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Err(EngineError::SessionUnavailable {
                endpoint: self.endpoint.clone(),
                reason: format!("session '{}' returned no page source", session_id),
            }),
            tree => Ok(tree.to_string()),
        }
    }

    fn unavailable(&self, error: reqwest::Error) -> EngineError {
        EngineError::SessionUnavailable {
            endpoint: self.endpoint.clone(),
            reason: error.to_string(),
        }
    }
}

/// Start the Appium server on `port` unless one is already answering.
///
/// The server process is detached; its output goes to `appium_server.log`
/// in the working directory. Readiness is re-polled a bounded number of
/// times — retries beyond that belong to the caller.
pub fn start_server(port: u16) -> Result<String, EngineError> {
    let endpoint = format!("http://127.0.0.1:{}", port);
    let client = AppiumClient::new(&endpoint);

    if client.server_status() {
        return Ok(format!("Appium is already running on port {}", port));
    }

    let log_path = "appium_server.log";
    let log = File::create(log_path).map_err(|e| EngineError::Io {
        context: format!("creating {}", log_path),
        source: e,
    })?;
    let log_err = log.try_clone().map_err(|e| EngineError::Io {
        context: format!("cloning handle for {}", log_path),
        source: e,
    })?;

    Command::new("appium")
        .arg("-p")
        .arg(port.to_string())
        .arg("--allow-cors")
        .stdin(Stdio::null())
        .stdout(log)
        .stderr(log_err)
        .spawn()
        .map_err(|e| EngineError::SubprocessSpawn {
            tool: "appium".into(),
            source: e,
        })?;

    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(500));
        if client.server_status() {
            return Ok(format!(
                "Appium server started on port {}. Log file: {}",
                port, log_path
            ));
        }
    }

    Err(EngineError::SessionUnavailable {
        endpoint,
        reason: "server process started but never reported ready".into(),
    })
}
