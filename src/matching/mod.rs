pub mod normalizer;
pub mod scorer;
pub mod types;

pub use types::*;

// Module-level constants
pub const TARGET_MATCH: &str = "matching";
