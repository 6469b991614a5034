//! Error types for the game session, the search and the configuration layer

use std::path::PathBuf;

use thiserror::Error;

use crate::board::Pos;

/// Why a move was rejected by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfBounds,
    Occupied,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRejection::OutOfBounds => f.write_str("out of bounds"),
            MoveRejection::Occupied => f.write_str("cell already occupied"),
        }
    }
}

/// Errors surfaced to whoever drives a [`GameSession`](crate::GameSession).
#[derive(Debug, Error)]
pub enum GameError {
    /// User-correctable: the board is unchanged.
    #[error("invalid move at ({row}, {col}): {reason}")]
    InvalidMove {
        row: i32,
        col: i32,
        reason: MoveRejection,
    },

    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Faults inside a single iterative-deepening run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The hard deadline expired while a depth was still being walked.
    #[error("hard deadline exceeded during the walk")]
    DeadlineExceeded,

    #[error("node limit exceeded during the walk")]
    NodeLimitExceeded,

    /// The generator handed out a cell the board refused.
    #[error("move generator produced an unplayable cell {0}")]
    UnplayableMove(Pos),

    #[error("search worker panicked at depth {depth}")]
    WorkerPanicked { depth: u8 },

    /// Every attempted depth was discarded, so there is no move to fall back on.
    #[error("no search depth completed")]
    NoCompletedDepth,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
