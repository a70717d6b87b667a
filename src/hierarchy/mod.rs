pub mod node;

pub use node::{NodeId, Platform, Snapshot, UINode};
