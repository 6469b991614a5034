//! Gomoku (K-in-a-row) against an alpha-beta AI
//!
//! Two sides, a human and the AI, alternately place stones on an N×N board.
//! The first to form an unbroken line of `win_length` stones along a row,
//! column or diagonal wins; longer lines count too.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: Board representation with incremental Zobrist fingerprint
//! - [`rules`]: Win detection, full and through the last move
//! - [`eval`]: Pattern table and position evaluation
//! - [`search`]: Candidate generation, transposition cache, iterative deepening
//! - [`session`]: One game: board, cache, configuration and outcome
//! - [`config`]: Configuration file and validation
//! - [`ui`]: egui desktop front-end
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use gomoku::{GameConfig, GameSession};
//!
//! let config = GameConfig { max_depth: 2, ..GameConfig::default() };
//! let mut session = GameSession::new(config).unwrap();
//!
//! session.apply_player_move(7, 7).unwrap();
//! if let Some(reply) = session.compute_ai_move(Duration::from_millis(500)).unwrap() {
//!     println!("AI plays at {} (depth {})", reply.pos, reply.report.depth);
//! }
//! ```
//!
//! # Search
//!
//! The AI runs alpha-beta at depth 1, 2, … up to `max_depth`, each depth to
//! completion on its own worker thread, keeping the move of the depth with
//! the strictly highest score. Evaluations and interior results are cached
//! by position for the whole game.

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE, DEFAULT_WIN_LENGTH};
pub use config::GameConfig;
pub use error::{ConfigError, GameError, MoveRejection, SearchError};
pub use search::{SearchEngine, SearchResult, SearchSettings, TranspositionCache};
pub use session::{AiMove, GameSession, GameStatus};
