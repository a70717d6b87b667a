use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::EngineError;
use crate::hierarchy::{node::*, Platform, NodeId, Snapshot};
use crate::normalize::scalar_to_string;

/// One element of an XCUITest accessibility tree, as serialized to JSON by
/// the introspector. `name` is the accessibility identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct IosNode {
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(rename = "isEnabled", default)]
    pub is_enabled: Option<Value>,
    #[serde(rename = "isVisible", default)]
    pub is_visible: Option<Value>,
    #[serde(default)]
    pub children: Vec<IosNode>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Render in the shared `[x1,y1][x2,y2]` bounds form so both platforms
    /// agree on the vocabulary.
    fn to_bounds(&self) -> String {
        format!(
            "[{},{}][{},{}]",
            self.x,
            self.y,
            self.x + self.width,
            self.y + self.height
        )
    }
}

pub fn normalize_ios(source: &str) -> Result<Snapshot, EngineError> {
    let parsed: Value =
        serde_json::from_str(source).map_err(|e| EngineError::MalformedHierarchy {
            reason: format!("not valid JSON: {}", e),
        })?;

    if parsed.is_array() {
        return Err(EngineError::MalformedHierarchy {
            reason: "expected a single rooted tree, found an array of roots".into(),
        });
    }

    let root: IosNode =
        serde_json::from_value(parsed).map_err(|e| EngineError::MalformedHierarchy {
            reason: format!("not an accessibility element tree: {}", e),
        })?;

    let mut snapshot = Snapshot::new(Platform::Ios);
    convert(&mut snapshot, &root, None);
    Ok(snapshot)
}

/// Role name from the element type: `XCUIElementTypeButton` -> `Button`.
pub fn tag_from_type(element_type: Option<&str>) -> String {
    match element_type {
        Some(t) if !t.trim().is_empty() => t
            .strip_prefix("XCUIElementType")
            .unwrap_or(t)
            .to_string(),
        _ => "Other".to_string(),
    }
}

fn convert(snapshot: &mut Snapshot, raw: &IosNode, parent: Option<NodeId>) {
    let mut attributes = BTreeMap::new();

    if let Some(element_type) = &raw.element_type {
        attributes.insert(ATTR_CLASS_NAME.to_string(), element_type.clone());
    }
    if let Some(name) = &raw.name {
        attributes.insert(ATTR_ACCESSIBILITY_ID.to_string(), name.clone());
    }
    if let Some(label) = &raw.label {
        attributes.insert(ATTR_LABEL.to_string(), label.clone());
    }
    if let Some(value) = &raw.value {
        attributes.insert(ATTR_TEXT.to_string(), scalar_to_string(value));
    }
    if let Some(rect) = &raw.rect {
        attributes.insert(ATTR_BOUNDS.to_string(), rect.to_bounds());
    }
    if let Some(enabled) = &raw.is_enabled {
        attributes.insert(ATTR_ENABLED.to_string(), scalar_to_string(enabled));
    }
    if let Some(visible) = &raw.is_visible {
        attributes.insert(ATTR_VISIBLE.to_string(), scalar_to_string(visible));
    }
    for (key, value) in &raw.extra {
        attributes.insert(key.clone(), scalar_to_string(value));
    }

    let tag = tag_from_type(raw.element_type.as_deref());
    let id = snapshot.push_node(tag, attributes, parent);

    for child in &raw.children {
        convert(snapshot, child, Some(id));
    }
}
