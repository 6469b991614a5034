//! Search module for Gomoku AI
//!
//! Contains:
//! - Tiered candidate generation
//! - Transposition cache for evaluations and interior results
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod movegen;
pub mod tt;

pub use alphabeta::{
    move_priority, order_moves, NodeResult, SearchEngine, SearchResult, SearchSettings, DEFAULT_MAX_DEPTH, INF,
};
pub use movegen::{generate_moves, manhattan, DEFAULT_MAX_CANDIDATES};
pub use tt::{CacheStats, EntryType, InteriorEntry, InteriorKey, TranspositionCache};
