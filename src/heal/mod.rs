pub mod matcher;
pub mod similarity;

pub use matcher::{heal, HealSuggestion, StaleLocator, DEFAULT_SIMILARITY_FLOOR};
pub use similarity::{normalize_label, text_similarity};
