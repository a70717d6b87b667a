use std::fmt;
use std::process::ExitStatus;

#[derive(Debug)]
pub enum EngineError {
    /// Raw dump is not a single well-formed rooted tree
    MalformedHierarchy { reason: String },

    /// YAML parsing or serialization failed (config, locator sidecar)
    Yaml { context: String, source: serde_yaml::Error },

    /// Automation server could not be reached or refused the request
    SessionUnavailable { endpoint: String, reason: String },

    /// External tool failed to spawn (adb, emulator, xcrun, appium)
    SubprocessSpawn { tool: String, source: std::io::Error },

    /// External tool exited with non-zero status
    SubprocessFailed { tool: String, status: ExitStatus, stderr: String },

    /// Filesystem operation failed
    Io { context: String, source: std::io::Error },

    /// Named element is missing from a loaded locator table
    ElementNotFound { element: String, table: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MalformedHierarchy { reason } => {
                write!(f, "Malformed hierarchy dump: {}", reason)
            }
            EngineError::Yaml { context, source } => {
                write!(f, "YAML error ({}): {}", context, source)
            }
            EngineError::SessionUnavailable { endpoint, reason } => {
                write!(f, "Automation server unavailable at {}: {}", endpoint, reason)
            }
            EngineError::SubprocessSpawn { tool, source } => {
                write!(f, "Failed to spawn '{}' (is it installed and on PATH?): {}", tool, source)
            }
            EngineError::SubprocessFailed { tool, status, stderr } => {
                write!(f, "'{}' exited with {}: {}", tool, status, stderr)
            }
            EngineError::Io { context, source } => {
                write!(f, "I/O error ({}): {}", context, source)
            }
            EngineError::ElementNotFound { element, table } => {
                write!(f, "Element '{}' not found in locator table '{}'", element, table)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Yaml { source, .. } => Some(source),
            EngineError::SubprocessSpawn { source, .. } => Some(source),
            EngineError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
