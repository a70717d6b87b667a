use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One line of the engine's JSONL trace.
///
/// Records quality events the pipeline degrades through rather than
/// raising: zero-specificity anomalies, ambiguous locators, healing runs.
#[derive(Debug, Serialize)]
pub struct EngineEvent {
    pub timestamp_ms: u128,
    pub kind: &'static str,

    pub element: Option<String>,
    pub strategy: Option<String>,
    pub value: Option<String>,

    pub similarity: Option<f64>,
    pub detail: Option<String>,
}

impl EngineEvent {
    pub fn now(kind: &'static str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            kind,
            element: None,
            strategy: None,
            value: None,
            similarity: None,
            detail: None,
        }
    }

    /// A candidate matched nothing in the snapshot it was derived from.
    /// Should not occur; points at a normalization bug.
    pub fn zero_specificity() -> Self {
        Self::now("zero_specificity_anomaly")
    }

    /// No candidate was unambiguous; the entry fell back to the absolute
    /// path and was flagged low-confidence.
    pub fn ambiguous_locator() -> Self {
        Self::now("ambiguous_locator")
    }

    pub fn heal_run() -> Self {
        Self::now("heal_run")
    }

    pub fn heal_no_candidates() -> Self {
        Self::now("heal_no_candidates")
    }

    pub fn with_element(mut self, element: impl ToString) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn with_strategy(mut self, strategy: impl ToString) -> Self {
        self.strategy = Some(strategy.to_string());
        self
    }

    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_similarity(mut self, similarity: f64) -> Self {
        self.similarity = Some(similarity);
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
