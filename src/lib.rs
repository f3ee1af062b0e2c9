pub mod config;
pub mod directory;
pub mod lexicon;
pub mod logging;
pub mod matching;
pub mod pipeline;
pub mod segment;

pub const TARGET_DIRECTORY: &str = "directory";
