//! Game rules for K-in-a-row
//!
//! A side wins by forming a run of at least `win_length` of its stones along
//! one of the four axes. Overlines count.

pub mod win;

// Re-exports for convenient access
pub use win::{check_win_at, find_winner, run_length, winning_line, would_win};
