pub mod android;
pub mod ios;

use crate::error::EngineError;
use crate::hierarchy::{Platform, Snapshot};

/// A platform-specific serialized UI tree, exactly as returned by the
/// session introspector. Held as raw text; parsing happens in `normalize`.
#[derive(Debug, Clone)]
pub enum RawDump {
    Android(String),
    Ios(String),
}

impl RawDump {
    pub fn platform(&self) -> Platform {
        match self {
            RawDump::Android(_) => Platform::Android,
            RawDump::Ios(_) => Platform::Ios,
        }
    }
}

/// Convert a raw dump into a platform-neutral snapshot.
///
/// Pure transformation: the raw input is never mutated, and on failure no
/// partial tree is returned. Platform attribute names are mapped to the
/// shared vocabulary; unknown attributes are preserved under their
/// original key.
pub fn normalize(raw: &RawDump) -> Result<Snapshot, EngineError> {
    match raw {
        RawDump::Android(source) => android::normalize_android(source),
        RawDump::Ios(source) => ios::normalize_ios(source),
    }
}

/// Render a raw JSON scalar as an attribute string. Dumps are inconsistent
/// about `"true"` vs `true`, so both forms land as the same string.
pub(crate) fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
