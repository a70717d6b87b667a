use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::EngineError;
use crate::hierarchy::{node::*, Platform, NodeId, Snapshot};
use crate::normalize::scalar_to_string;

/// One element of a UiAutomator2-style attributed tree, as serialized to
/// JSON by the introspector (`source?format=json`).
#[derive(Debug, Clone, Deserialize)]
pub struct AndroidNode {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(rename = "resource-id", default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "content-desc", default)]
    pub content_desc: Option<String>,
    #[serde(default)]
    pub bounds: Option<String>,
    #[serde(default)]
    pub enabled: Option<Value>,
    #[serde(default)]
    pub displayed: Option<Value>,
    #[serde(default)]
    pub children: Vec<AndroidNode>,

    /// Anything the dialect mapping does not cover, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Top-level dump shape: either the root element itself, or the
/// `{"hierarchy": <root>}` wrapper some driver versions emit.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AndroidDump {
    Wrapped { hierarchy: AndroidNode },
    Bare(AndroidNode),
}

pub fn normalize_android(source: &str) -> Result<Snapshot, EngineError> {
    let parsed: Value =
        serde_json::from_str(source).map_err(|e| EngineError::MalformedHierarchy {
            reason: format!("not valid JSON: {}", e),
        })?;

    if parsed.is_array() {
        return Err(EngineError::MalformedHierarchy {
            reason: "expected a single rooted tree, found an array of roots".into(),
        });
    }

    let dump: AndroidDump =
        serde_json::from_value(parsed).map_err(|e| EngineError::MalformedHierarchy {
            reason: format!("not an attributed element tree: {}", e),
        })?;

    let root = match dump {
        AndroidDump::Wrapped { hierarchy } => hierarchy,
        AndroidDump::Bare(node) => node,
    };

    let mut snapshot = Snapshot::new(Platform::Android);
    convert(&mut snapshot, &root, None);
    Ok(snapshot)
}

/// Role name from the platform class: `android.widget.Button` -> `Button`.
pub fn tag_from_class(class: Option<&str>) -> String {
    match class {
        Some(c) if !c.trim().is_empty() => c
            .rsplit('.')
            .next()
            .unwrap_or(c)
            .to_string(),
        _ => "View".to_string(),
    }
}

fn convert(snapshot: &mut Snapshot, raw: &AndroidNode, parent: Option<NodeId>) {
    let mut attributes = BTreeMap::new();

    if let Some(class) = &raw.class {
        attributes.insert(ATTR_CLASS_NAME.to_string(), class.clone());
    }
    if let Some(id) = &raw.resource_id {
        attributes.insert(ATTR_RESOURCE_ID.to_string(), id.clone());
    }
    if let Some(text) = &raw.text {
        attributes.insert(ATTR_TEXT.to_string(), text.clone());
    }
    if let Some(desc) = &raw.content_desc {
        // content-desc doubles as the accessible label and the
        // accessibility id on Android.
        attributes.insert(ATTR_ACCESSIBILITY_ID.to_string(), desc.clone());
        attributes.insert(ATTR_LABEL.to_string(), desc.clone());
    }
    if let Some(bounds) = &raw.bounds {
        attributes.insert(ATTR_BOUNDS.to_string(), bounds.clone());
    }
    if let Some(enabled) = &raw.enabled {
        attributes.insert(ATTR_ENABLED.to_string(), scalar_to_string(enabled));
    }
    if let Some(displayed) = &raw.displayed {
        attributes.insert(ATTR_VISIBLE.to_string(), scalar_to_string(displayed));
    }
    for (key, value) in &raw.extra {
        attributes.insert(key.clone(), scalar_to_string(value));
    }

    let tag = tag_from_class(raw.class.as_deref());
    let id = snapshot.push_node(tag, attributes, parent);

    for child in &raw.children {
        convert(snapshot, child, Some(id));
    }
}
