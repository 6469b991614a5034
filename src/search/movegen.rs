//! Tiered candidate move generation
//!
//! Candidates come out in three tiers, concatenated and cut to `cap`:
//!
//! 1. **Contact**: empty cells touching a stone (Chebyshev distance 1)
//! 2. **Tactical**: other empty cells where either side would complete a win
//! 3. **Fallback**: every remaining empty cell, nearest the center first
//!
//! The result depends only on board content. No tier is computed once the
//! earlier ones already fill the cap.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::generate_moves;
//!
//! let mut board = Board::new(15, 5);
//! board.apply(Pos::new(7, 7), Stone::Human).unwrap();
//!
//! let moves = generate_moves(&board, 15);
//! assert_eq!(moves.len(), 15);
//! assert!(moves[..8].iter().all(|m| m.chebyshev(Pos::new(7, 7)) == 1));
//! ```

use crate::board::{Board, Pos, Stone};
use crate::rules::would_win;

/// Default cap on candidates per node
pub const DEFAULT_MAX_CANDIDATES: usize = 15;

/// Generate up to `cap` candidate moves for the side to move.
///
/// Never yields an occupied cell. Empty on a full board.
pub fn generate_moves(board: &Board, cap: usize) -> Vec<Pos> {
    let mut moves = Vec::with_capacity(cap);
    if cap == 0 || board.is_full() {
        return moves;
    }

    // Tier 1: contact moves
    let mut taken = vec![false; board.size() * board.size()];
    for pos in board.positions() {
        if board.is_empty(pos) && board.has_neighbor(pos) {
            taken[slot(board, pos)] = true;
            moves.push(pos);
        }
    }
    if moves.len() >= cap {
        moves.truncate(cap);
        return moves;
    }

    // Tier 2: cells that would complete a run for either side
    for pos in board.positions() {
        if taken[slot(board, pos)] || !board.is_empty(pos) {
            continue;
        }
        if would_win(board, pos, Stone::Ai) || would_win(board, pos, Stone::Human) {
            taken[slot(board, pos)] = true;
            moves.push(pos);
        }
    }
    if moves.len() >= cap {
        moves.truncate(cap);
        return moves;
    }

    // Tier 3: everything else, center-outward
    let mut rest: Vec<Pos> = board
        .positions()
        .filter(|&pos| !taken[slot(board, pos)] && board.is_empty(pos))
        .collect();
    let center = board.center();
    rest.sort_by_key(|&pos| (manhattan(pos, center), pos));
    moves.extend(rest.into_iter().take(cap - moves.len()));

    moves
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> u32 {
    u32::from(a.row.abs_diff(b.row)) + u32::from(a.col.abs_diff(b.col))
}

#[inline]
fn slot(board: &Board, pos: Pos) -> usize {
    pos.row as usize * board.size() + pos.col as usize
}
