//! Position evaluation
//!
//! - [`patterns`]: the ranked tactical pattern table
//! - [`heuristic`]: window extraction and the board score

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, pattern_totals, DEFAULT_DEFENSE_WEIGHT};
pub use patterns::PatternScore;
