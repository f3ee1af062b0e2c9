pub mod boundary;
pub mod recombine;
pub mod review;
pub mod types;

pub use types::*;

// Module-level constants
pub const TARGET_SEGMENT: &str = "segment";
