//! Board representation for Gomoku

pub mod board;
pub mod zobrist;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::{Board, Placed};
pub use zobrist::ZobristTable;

/// Default board size (15x15)
pub const DEFAULT_BOARD_SIZE: usize = 15;
/// Default run length required to win
pub const DEFAULT_WIN_LENGTH: usize = 5;

/// The four line axes: horizontal, vertical and both diagonals.
/// Each axis is scanned in both directions, so one vector per axis suffices.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Cell contents. `Human` and `Ai` double as the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Human,
    Ai,
}

impl Stone {
    /// Get the other side
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Human => Stone::Ai,
            Stone::Ai => Stone::Human,
            Stone::Empty => Stone::Empty,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance (king moves) between two cells
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}
