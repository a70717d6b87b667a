pub mod candidate;
pub mod generate;
pub mod rank;
pub mod xpath;

pub use candidate::{LocatorCandidate, LocatorEntry, LocatorStrategy};
pub use generate::{candidates, is_element_worthy, match_count};
pub use rank::{rank, RankedLocators};
