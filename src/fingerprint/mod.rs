// Fingerprint record, classification heuristics and the concurrent builder
pub mod types;
pub mod classify;
pub mod builder;

pub use builder::{build_fingerprint, collect_inventory};
pub use types::Fingerprint;
