use std::fmt;

use serde::{Deserialize, Serialize};

/// A named method of addressing a UI element.
///
/// Variants are listed in stability order: how likely the locator is to
/// survive layout drift, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocatorStrategy {
    #[serde(rename = "resourceId")]
    ResourceId,
    #[serde(rename = "accessibilityId")]
    AccessibilityId,
    #[serde(rename = "uniqueText")]
    UniqueText,
    #[serde(rename = "xpathRelative")]
    XPathRelative,
    #[serde(rename = "xpathAbsolute")]
    XPathAbsolute,
}

impl LocatorStrategy {
    /// Fixed precedence; lower ranks are preferred by the ranker.
    pub fn stability_rank(&self) -> u8 {
        match self {
            LocatorStrategy::ResourceId => 0,
            LocatorStrategy::AccessibilityId => 1,
            LocatorStrategy::UniqueText => 2,
            LocatorStrategy::XPathRelative => 3,
            LocatorStrategy::XPathAbsolute => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocatorStrategy::ResourceId => "resourceId",
            LocatorStrategy::AccessibilityId => "accessibilityId",
            LocatorStrategy::UniqueText => "uniqueText",
            LocatorStrategy::XPathRelative => "xpathRelative",
            LocatorStrategy::XPathAbsolute => "xpathAbsolute",
        }
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One proposed way to find a node in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorCandidate {
    pub strategy: LocatorStrategy,
    pub value: String,
    /// How many nodes of the source snapshot this candidate matches.
    /// 1 means unambiguous; only specificity-1 candidates become primaries.
    pub specificity: usize,
}

/// The durable output unit: one named element with its chosen locator.
///
/// Immutable after generation. Healing never mutates an entry; it proposes
/// replacements that a human or follow-up run must accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorEntry {
    pub element_name: String,
    pub primary: LocatorCandidate,
    /// Next-best candidates in precedence order. A search start set for the
    /// healing matcher, never emitted as executable alternate lookups.
    #[serde(default)]
    pub fallbacks: Vec<LocatorCandidate>,
    /// Text/label observed at generation time; the healing anchor.
    #[serde(default)]
    pub original_text: Option<String>,
    /// Set when no candidate was unambiguous and the absolute path was
    /// used as a last resort.
    #[serde(default)]
    pub low_confidence: bool,
}
