pub mod emitter;
pub mod naming;
pub mod table;

pub use emitter::emit;
pub use naming::{base_name, sanitize_identifier, NameAllocator};
pub use table::LocatorTable;
