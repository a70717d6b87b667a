use serde::{Deserialize, Serialize};

use crate::hierarchy::Snapshot;
use crate::heal::similarity::text_similarity;
use crate::locator::{candidates, rank, xpath, LocatorEntry, LocatorStrategy};
use crate::trace::{EngineEvent, TraceLogger};

/// Default similarity floor. A calibration knob, not a contract; override
/// via config when real-world label drift says otherwise.
pub const DEFAULT_SIMILARITY_FLOOR: f64 = 0.5;

/// What the driver remembers about a locator that stopped resolving:
/// the failed strategy/value pair, the text anchor observed at generation
/// time, and the last known structural position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaleLocator {
    pub strategy: LocatorStrategy,
    pub value: String,
    pub original_text: Option<String>,
    /// xpathAbsolute of the element when it was last seen, used only for
    /// proximity tie-breaks.
    pub last_known_path: Option<String>,
}

impl StaleLocator {
    pub fn from_entry(entry: &LocatorEntry) -> Self {
        let last_known_path = std::iter::once(&entry.primary)
            .chain(entry.fallbacks.iter())
            .find(|c| c.strategy == LocatorStrategy::XPathAbsolute)
            .map(|c| c.value.clone());

        Self {
            strategy: entry.primary.strategy,
            value: entry.primary.value.clone(),
            original_text: entry.original_text.clone(),
            last_known_path,
        }
    }
}

/// One ranked replacement proposal. Advisory output: the matcher never
/// applies a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealSuggestion {
    pub strategy: LocatorStrategy,
    pub value: String,
    /// Text similarity of the suggested node to the remembered label.
    pub confidence: f64,
    pub low_confidence: bool,
}

/// Search a fresh snapshot for plausible replacements of a stale locator.
///
/// Nodes with visible text are scored against the remembered label;
/// survivors of the similarity floor get fresh candidates generated and
/// ranked, and the per-node winners are ordered by similarity, then by
/// structural proximity to the stale element's last known position. An
/// empty result is the normal "no healing possible" outcome, not an error.
pub fn heal(
    stale: &StaleLocator,
    snapshot: &Snapshot,
    floor: f64,
    tracer: &TraceLogger,
) -> Vec<HealSuggestion> {
    let anchor = match &stale.original_text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            tracer.log(
                &EngineEvent::heal_no_candidates()
                    .with_strategy(stale.strategy)
                    .with_value(&stale.value)
                    .with_detail("stale locator carries no text anchor"),
            );
            return Vec::new();
        }
    };

    let stale_steps = stale
        .last_known_path
        .as_deref()
        .and_then(xpath::path_steps);

    struct Scored {
        suggestion: HealSuggestion,
        proximity: usize,
    }

    let mut scored: Vec<Scored> = Vec::new();
    for node in snapshot.iter() {
        let Some(live_text) = node.text_or_label() else {
            continue;
        };
        let similarity = text_similarity(anchor, live_text);
        if similarity < floor {
            continue;
        }

        let Some(ranked) = rank(candidates(snapshot, node.id, tracer)) else {
            continue;
        };

        let proximity = match &stale_steps {
            Some(stale_steps) => {
                let here = xpath::absolute_path(snapshot, node.id).render();
                match xpath::path_steps(&here) {
                    Some(steps) => strsim::generic_levenshtein(stale_steps, &steps),
                    None => usize::MAX,
                }
            }
            None => 0,
        };

        scored.push(Scored {
            suggestion: HealSuggestion {
                strategy: ranked.primary.strategy,
                value: ranked.primary.value,
                confidence: similarity,
                low_confidence: ranked.low_confidence,
            },
            proximity,
        });
    }

    scored.sort_by(|a, b| {
        b.suggestion
            .confidence
            .partial_cmp(&a.suggestion.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.proximity.cmp(&b.proximity))
            .then(a.suggestion.value.cmp(&b.suggestion.value))
    });

    if scored.is_empty() {
        tracer.log(
            &EngineEvent::heal_no_candidates()
                .with_strategy(stale.strategy)
                .with_value(&stale.value),
        );
    } else {
        tracer.log(
            &EngineEvent::heal_run()
                .with_strategy(stale.strategy)
                .with_value(&stale.value)
                .with_similarity(scored[0].suggestion.confidence)
                .with_detail(format!("{} suggestion(s)", scored.len())),
        );
    }

    scored.into_iter().map(|s| s.suggestion).collect()
}
