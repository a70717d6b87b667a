//! Deterministic XPath subset used for structural locators.
//!
//! Only what the generator emits is supported: child (`/`) and descendant
//! (`//`) axes over platform class names, with either a 1-based position
//! predicate (`[3]`) or a single attribute-equality predicate
//! (`[@resourceId='login']`). Attribute keys are from the shared
//! vocabulary, so predicates evaluate against normalized attributes.

use crate::hierarchy::{node::*, NodeId, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// 1-based position among same-class matches.
    Position(usize),
    AttrEquals { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub axis: Axis,
    pub class_name: String,
    pub predicate: Option<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSelector {
    pub steps: Vec<Step>,
}

impl PathSelector {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            out.push_str(match step.axis {
                Axis::Child => "/",
                Axis::Descendant => "//",
            });
            out.push_str(&step.class_name);
            match &step.predicate {
                Some(Predicate::Position(n)) => {
                    out.push_str(&format!("[{}]", n));
                }
                Some(Predicate::AttrEquals { key, value }) => {
                    out.push_str(&format!("[@{}='{}']", key, value));
                }
                None => {}
            }
        }
        out
    }
}

/// True when a literal can appear inside a single-quoted predicate. The
/// subset has no quote escaping, so such values take the indexed form.
pub fn predicate_safe(value: &str) -> bool {
    !value.contains('\'')
}

// ============================================================================
// Path construction
// ============================================================================

/// Full root-to-node path. Unique by construction: every non-root step
/// carries the node's position among same-class siblings.
pub fn absolute_path(snapshot: &Snapshot, id: NodeId) -> PathSelector {
    let mut chain: Vec<NodeId> = snapshot.ancestors(id);
    chain.reverse();
    chain.push(id);

    let steps = chain
        .iter()
        .map(|&step_id| {
            let node = snapshot.node(step_id);
            let predicate = node
                .parent
                .map(|_| Predicate::Position(snapshot.class_position(step_id)));
            Step {
                axis: Axis::Child,
                class_name: node.class_name().to_string(),
                predicate,
            }
        })
        .collect();

    PathSelector { steps }
}

/// Shortest path anchored at the nearest ancestor holding a usable id.
///
/// When the target carries a discriminating attribute, the path is the
/// two-step descendant form; otherwise an explicit indexed child chain
/// from the anchor. Returns `None` when no ancestor is identifiable.
pub fn relative_path(snapshot: &Snapshot, id: NodeId) -> Option<PathSelector> {
    let (anchor, anchor_pred) = snapshot.ancestors(id).into_iter().find_map(|ancestor_id| {
        let ancestor = snapshot.node(ancestor_id);
        [ATTR_RESOURCE_ID, ATTR_ACCESSIBILITY_ID]
            .iter()
            .find_map(|&key| {
                ancestor
                    .non_empty_attr(key)
                    .filter(|v| predicate_safe(v))
                    .map(|v| {
                        (
                            ancestor_id,
                            Predicate::AttrEquals {
                                key: key.to_string(),
                                value: v.to_string(),
                            },
                        )
                    })
            })
    })?;

    let mut steps = vec![Step {
        axis: Axis::Descendant,
        class_name: snapshot.node(anchor).class_name().to_string(),
        predicate: Some(anchor_pred),
    }];

    let node = snapshot.node(id);
    let discriminator = [ATTR_TEXT, ATTR_LABEL].iter().find_map(|&key| {
        node.non_empty_attr(key)
            .filter(|v| predicate_safe(v))
            .map(|v| Predicate::AttrEquals {
                key: key.to_string(),
                value: v.to_string(),
            })
    });

    match discriminator {
        Some(pred) => {
            steps.push(Step {
                axis: Axis::Descendant,
                class_name: node.class_name().to_string(),
                predicate: Some(pred),
            });
        }
        None => {
            // Indexed child chain from the anchor down to the node.
            let mut chain: Vec<NodeId> = Vec::new();
            let mut current = id;
            while current != anchor {
                chain.push(current);
                current = snapshot.node(current).parent?;
            }
            chain.reverse();
            for step_id in chain {
                steps.push(Step {
                    axis: Axis::Child,
                    class_name: snapshot.node(step_id).class_name().to_string(),
                    predicate: Some(Predicate::Position(snapshot.class_position(step_id))),
                });
            }
        }
    }

    Some(PathSelector { steps })
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a selector previously produced by `render`. Returns `None` for
/// anything outside the subset; callers treat that as a non-match.
pub fn parse(value: &str) -> Option<PathSelector> {
    let chars: Vec<char> = value.chars().collect();
    let mut pos = 0;
    let mut steps = Vec::new();

    while pos < chars.len() {
        let axis = if chars[pos] != '/' {
            return None;
        } else if pos + 1 < chars.len() && chars[pos + 1] == '/' {
            pos += 2;
            Axis::Descendant
        } else {
            pos += 1;
            Axis::Child
        };

        let class_start = pos;
        while pos < chars.len() && chars[pos] != '[' && chars[pos] != '/' {
            pos += 1;
        }
        let class_name: String = chars[class_start..pos].iter().collect();
        if class_name.is_empty() {
            return None;
        }

        let predicate = if pos < chars.len() && chars[pos] == '[' {
            pos += 1;
            let pred = parse_predicate(&chars, &mut pos)?;
            if pos >= chars.len() || chars[pos] != ']' {
                return None;
            }
            pos += 1;
            Some(pred)
        } else {
            None
        };

        steps.push(Step {
            axis,
            class_name,
            predicate,
        });
    }

    if steps.is_empty() {
        return None;
    }
    Some(PathSelector { steps })
}

fn parse_predicate(chars: &[char], pos: &mut usize) -> Option<Predicate> {
    if *pos < chars.len() && chars[*pos] == '@' {
        *pos += 1;
        let key_start = *pos;
        while *pos < chars.len() && chars[*pos] != '=' {
            *pos += 1;
        }
        let key: String = chars[key_start..*pos].iter().collect();
        if key.is_empty() || *pos + 1 >= chars.len() || chars[*pos + 1] != '\'' {
            return None;
        }
        *pos += 2; // consume ='
        let value_start = *pos;
        while *pos < chars.len() && chars[*pos] != '\'' {
            *pos += 1;
        }
        if *pos >= chars.len() {
            return None;
        }
        let value: String = chars[value_start..*pos].iter().collect();
        *pos += 1; // closing quote
        Some(Predicate::AttrEquals { key, value })
    } else {
        let digit_start = *pos;
        while *pos < chars.len() && chars[*pos].is_ascii_digit() {
            *pos += 1;
        }
        let digits: String = chars[digit_start..*pos].iter().collect();
        digits.parse::<usize>().ok().map(Predicate::Position)
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Resolve a selector against a snapshot, returning matches in document
/// (pre-order id) order. A pure tree scan; nothing is cached or mutated.
pub fn resolve(snapshot: &Snapshot, selector: &PathSelector) -> Vec<NodeId> {
    // `None` is the virtual document context above the root.
    let mut contexts: Vec<Option<NodeId>> = vec![None];

    for step in &selector.steps {
        let mut next: Vec<NodeId> = Vec::new();
        for &context in &contexts {
            let pool: Vec<NodeId> = match step.axis {
                Axis::Child => match context {
                    None => vec![snapshot.root()],
                    Some(id) => snapshot.node(id).children.clone(),
                },
                Axis::Descendant => match context {
                    None => snapshot.iter().map(|n| n.id).collect(),
                    Some(id) => descendants(snapshot, id),
                },
            };

            let class_matches: Vec<NodeId> = pool
                .into_iter()
                .filter(|&id| snapshot.node(id).class_name() == step.class_name)
                .collect();

            match &step.predicate {
                None => next.extend(class_matches),
                Some(Predicate::Position(n)) => {
                    if *n >= 1 {
                        if let Some(&id) = class_matches.get(n - 1) {
                            next.push(id);
                        }
                    }
                }
                Some(Predicate::AttrEquals { key, value }) => {
                    next.extend(class_matches.into_iter().filter(|&id| {
                        snapshot
                            .node(id)
                            .attr(key)
                            .map(|v| v.trim() == value)
                            .unwrap_or(false)
                    }));
                }
            }
        }

        next.sort();
        next.dedup();
        contexts = next.into_iter().map(Some).collect();
        if contexts.is_empty() {
            return Vec::new();
        }
    }

    contexts.into_iter().flatten().collect()
}

fn descendants(snapshot: &Snapshot, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = snapshot.node(id).children.iter().rev().copied().collect();
    while let Some(current) = stack.pop() {
        out.push(current);
        stack.extend(snapshot.node(current).children.iter().rev().copied());
    }
    out
}

/// Path steps as comparable strings, for structural-proximity scoring.
pub fn path_steps(value: &str) -> Option<Vec<String>> {
    parse(value).map(|sel| {
        sel.steps
            .iter()
            .map(|s| {
                let mut rendered = PathSelector {
                    steps: vec![s.clone()],
                }
                .render();
                // Axis noise is irrelevant to proximity.
                while rendered.starts_with('/') {
                    rendered.remove(0);
                }
                rendered
            })
            .collect()
    })
}
