use crate::locator::candidate::{LocatorCandidate, LocatorStrategy};

/// Ranking outcome for one node: the chosen primary plus the ordered
/// search start set for healing.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLocators {
    pub primary: LocatorCandidate,
    pub fallbacks: Vec<LocatorCandidate>,
    pub low_confidence: bool,
}

/// Order candidates by the stability policy and pick the primary.
///
/// Precedence: resourceId > accessibilityId > uniqueText > xpathRelative >
/// xpathAbsolute. Within a strategy the shorter literal wins, then the
/// literal itself as a total-order key so repeated runs over an unchanged
/// tree produce identical output. The primary is the highest-precedence
/// specificity-1 candidate; an ambiguous node falls back to the absolute
/// path and is flagged low-confidence.
pub fn rank(mut candidates: Vec<LocatorCandidate>) -> Option<RankedLocators> {
    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by(|a, b| {
        a.strategy
            .stability_rank()
            .cmp(&b.strategy.stability_rank())
            .then(a.value.len().cmp(&b.value.len()))
            .then(a.value.cmp(&b.value))
    });

    let primary_index = candidates.iter().position(|c| c.specificity == 1);
    let (primary_index, low_confidence) = match primary_index {
        // Landing on the absolute path means every stabler candidate was
        // ambiguous; the entry is still usable but flagged for consumers.
        Some(i) => (i, candidates[i].strategy == LocatorStrategy::XPathAbsolute),
        None => {
            let i = candidates
                .iter()
                .position(|c| c.strategy == LocatorStrategy::XPathAbsolute)?;
            (i, true)
        }
    };

    let primary = candidates.remove(primary_index);
    Some(RankedLocators {
        primary,
        fallbacks: candidates,
        low_confidence,
    })
}
