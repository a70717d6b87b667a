use crate::hierarchy::{node::*, NodeId, Snapshot};
use crate::locator::candidate::{LocatorCandidate, LocatorStrategy};
use crate::locator::xpath;
use crate::trace::{EngineEvent, TraceLogger};

/// Whether a node deserves a page-object entry: anything addressable by
/// id, accessibility id, or visible text. Pure containers are skipped.
pub fn is_element_worthy(snapshot: &Snapshot, id: NodeId) -> bool {
    let node = snapshot.node(id);
    node.non_empty_attr(ATTR_RESOURCE_ID).is_some()
        || node.non_empty_attr(ATTR_ACCESSIBILITY_ID).is_some()
        || node.text_or_label().is_some()
}

/// Count how many nodes of the snapshot a candidate matches.
///
/// This is the specificity measure: a pure scan of the whole tree, run for
/// every candidate before ranking.
pub fn match_count(snapshot: &Snapshot, strategy: LocatorStrategy, value: &str) -> usize {
    match strategy {
        LocatorStrategy::ResourceId => attr_equals_count(snapshot, ATTR_RESOURCE_ID, value),
        LocatorStrategy::AccessibilityId => {
            attr_equals_count(snapshot, ATTR_ACCESSIBILITY_ID, value)
        }
        LocatorStrategy::UniqueText => snapshot
            .iter()
            .filter(|node| {
                node.non_empty_attr(ATTR_TEXT) == Some(value)
                    || node.non_empty_attr(ATTR_LABEL) == Some(value)
            })
            .count(),
        LocatorStrategy::XPathRelative | LocatorStrategy::XPathAbsolute => {
            match xpath::parse(value) {
                Some(selector) => xpath::resolve(snapshot, &selector).len(),
                None => 0,
            }
        }
    }
}

fn attr_equals_count(snapshot: &Snapshot, key: &str, value: &str) -> usize {
    snapshot
        .iter()
        .filter(|node| node.non_empty_attr(key) == Some(value))
        .count()
}

/// Derive every candidate locator for one node, in fixed strategy order,
/// at most one per strategy. Specificity is computed by evaluating each
/// candidate against the full tree; a specificity-0 candidate points at a
/// normalization bug and is discarded with a logged anomaly, not a failure.
pub fn candidates(snapshot: &Snapshot, id: NodeId, tracer: &TraceLogger) -> Vec<LocatorCandidate> {
    let node = snapshot.node(id);
    let mut raw: Vec<(LocatorStrategy, String)> = Vec::new();

    if let Some(value) = node.non_empty_attr(ATTR_RESOURCE_ID) {
        raw.push((LocatorStrategy::ResourceId, value.to_string()));
    }
    if let Some(value) = node.non_empty_attr(ATTR_ACCESSIBILITY_ID) {
        raw.push((LocatorStrategy::AccessibilityId, value.to_string()));
    }
    if let Some(value) = node.text_or_label() {
        raw.push((LocatorStrategy::UniqueText, value.to_string()));
    }
    if let Some(selector) = xpath::relative_path(snapshot, id) {
        raw.push((LocatorStrategy::XPathRelative, selector.render()));
    }
    raw.push((
        LocatorStrategy::XPathAbsolute,
        xpath::absolute_path(snapshot, id).render(),
    ));

    let mut out = Vec::new();
    for (strategy, value) in raw {
        let specificity = match_count(snapshot, strategy, &value);
        if specificity == 0 {
            tracer.log(
                &EngineEvent::zero_specificity()
                    .with_strategy(strategy)
                    .with_value(&value),
            );
            continue;
        }
        out.push(LocatorCandidate {
            strategy,
            value,
            specificity,
        });
    }
    out
}
