use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Shared attribute vocabulary
// ============================================================================
//
// Platform-specific dialects are mapped onto these keys at normalization
// time. Unmapped attributes keep their original key, so nothing is dropped.

pub const ATTR_RESOURCE_ID: &str = "resourceId";
pub const ATTR_ACCESSIBILITY_ID: &str = "accessibilityId";
pub const ATTR_TEXT: &str = "text";
pub const ATTR_LABEL: &str = "label";
pub const ATTR_CLASS_NAME: &str = "className";
pub const ATTR_BOUNDS: &str = "bounds";
pub const ATTR_ENABLED: &str = "enabled";
pub const ATTR_VISIBLE: &str = "visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

/// Snapshot-local node index. Valid only within the snapshot that
/// produced it; never persisted and never compared across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct UINode {
    pub id: NodeId,
    /// Semantic role derived from the platform class ("Button", "TextField", ...)
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl UINode {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute value, filtered to non-empty after trimming.
    pub fn non_empty_attr(&self, key: &str) -> Option<&str> {
        self.attr(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// The visible text anchor: `text`, falling back to `label`.
    pub fn text_or_label(&self) -> Option<&str> {
        self.non_empty_attr(ATTR_TEXT)
            .or_else(|| self.non_empty_attr(ATTR_LABEL))
    }

    pub fn class_name(&self) -> &str {
        self.attr(ATTR_CLASS_NAME).unwrap_or(&self.tag)
    }
}

/// One point-in-time capture of a session's UI tree.
///
/// Arena storage: nodes live in a flat vec indexed by `NodeId`, assigned in
/// pre-order at normalization time. Parent links are indices, never owning
/// references, so the whole snapshot is dropped as one unit.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub platform: Platform,
    nodes: Vec<UINode>,
}

impl Snapshot {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            nodes: Vec::new(),
        }
    }

    /// Reserve the next id and store a node under it. Children are wired up
    /// by the caller as it walks the raw tree.
    pub fn push_node(
        &mut self,
        tag: String,
        attributes: BTreeMap<String, String>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(UINode {
            id,
            tag,
            attributes,
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &UINode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order (the order they were assigned ids).
    pub fn iter(&self) -> impl Iterator<Item = &UINode> {
        self.nodes.iter()
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            out.push(p);
            current = self.node(p).parent;
        }
        out
    }

    /// 1-based position of `id` among siblings sharing its class name.
    pub fn class_position(&self, id: NodeId) -> usize {
        let node = self.node(id);
        let class = node.class_name();
        match node.parent {
            None => 1,
            Some(p) => {
                let mut position = 0;
                for &sibling in &self.node(p).children {
                    if self.node(sibling).class_name() == class {
                        position += 1;
                    }
                    if sibling == id {
                        return position;
                    }
                }
                position
            }
        }
    }

    /// SHA-1 digest over the normalized tree, stable across runs for an
    /// unchanged dump. Used for artifact provenance, not identity.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        for node in &self.nodes {
            hasher.update(node.tag.as_bytes());
            hasher.update([0u8]);
            for (key, value) in &node.attributes {
                hasher.update(key.as_bytes());
                hasher.update([1u8]);
                hasher.update(value.as_bytes());
                hasher.update([1u8]);
            }
            hasher.update(node.children.len().to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}
