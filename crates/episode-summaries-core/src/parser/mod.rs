//! HTML parsers for Wikipedia pages
//!
//! - `episodes`: extract episode records from a season article

pub mod episodes;

// Re-export main parsing functions
pub use episodes::{count_part_separators, extract_episodes, normalize_summary};
