use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::hierarchy::Platform;
use crate::locator::LocatorEntry;

/// The durable locator metadata for one page object, persisted as a YAML
/// sidecar next to the emitted source. The healing path loads stale
/// records from here; the engine itself never rewrites a saved table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorTable {
    pub page_name: String,
    pub platform: Platform,
    /// Fingerprint of the snapshot the entries were generated from.
    pub snapshot_fingerprint: String,
    pub entries: Vec<LocatorEntry>,
}

impl LocatorTable {
    pub fn entry(&self, element_name: &str) -> Option<&LocatorEntry> {
        self.entries.iter().find(|e| e.element_name == element_name)
    }

    pub fn to_yaml(&self) -> Result<String, EngineError> {
        serde_yaml::to_string(self).map_err(|e| EngineError::Yaml {
            context: format!("serializing locator table '{}'", self.page_name),
            source: e,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, EngineError> {
        serde_yaml::from_str(content).map_err(|e| EngineError::Yaml {
            context: "parsing locator table".into(),
            source: e,
        })
    }
}
