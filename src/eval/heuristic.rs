//! Static evaluation of a board position
//!
//! The score is a pure function of board content: positive favors the AI,
//! negative favors the human. There is no side-to-move argument, so results
//! can be cached by fingerprint alone.
//!
//! # Defense weight
//!
//! Human pattern matches are multiplied by a weight greater than one before
//! being subtracted. This makes the AI value blocking a human formation more
//! than building the same formation itself. It also means
//! `evaluate(b) != -evaluate(swap_sides(b))`, so the usual minimax guarantee
//! that a deeper search never reports a worse value for the same line no
//! longer holds.

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::rules::find_winner;

use super::patterns::{score_window, PatternScore};

/// Half-width of a window: cells on each side of the center cell
const HALF_WINDOW: i32 = 4;
/// Window length in cells (4 before, the center, 4 after)
pub const WINDOW_LEN: usize = 2 * HALF_WINDOW as usize + 1;

/// Default multiplier applied to human pattern scores
pub const DEFAULT_DEFENSE_WEIGHT: f64 = 1.5;

/// Evaluate the board from the AI's point of view.
///
/// A finished winning run scores `±PatternScore::WIN`. Otherwise every empty
/// cell touching a stone contributes the pattern scores of its four
/// windows: AI matches are added, human matches are subtracted after
/// scaling by `defense_weight`.
///
/// # Example
///
/// ```
/// use gomoku::board::{Board, Pos, Stone};
/// use gomoku::eval::evaluate;
///
/// let mut board = Board::new(15, 5);
/// for col in 5..8 {
///     board.apply(Pos::new(7, col), Stone::Ai).unwrap();
/// }
/// assert!(evaluate(&board, 1.5) > 0);
/// ```
#[must_use]
pub fn evaluate(board: &Board, defense_weight: f64) -> i32 {
    match find_winner(board) {
        Some(Stone::Ai) => return PatternScore::WIN,
        Some(Stone::Human) => return -PatternScore::WIN,
        _ => {}
    }

    let (ai, human) = pattern_totals(board);
    ai - scale(human, defense_weight)
}

/// Raw pattern totals `(ai, human)` before the defense weight is applied.
pub fn pattern_totals(board: &Board) -> (i32, i32) {
    let mut ai = 0;
    let mut human = 0;
    let mut window = [b'_'; WINDOW_LEN];

    for pos in board.positions() {
        if !board.is_empty(pos) || !board.has_neighbor(pos) {
            continue;
        }
        for &dir in &DIRECTIONS {
            fill_window(board, pos, dir, Stone::Ai, &mut window);
            ai += score_window(&window);
            mirror(&mut window);
            human += score_window(&window);
        }
    }

    (ai, human)
}

/// Encode the window through `pos` along `dir` with `side` as `X`.
///
/// Off-board cells are encoded as empty.
pub fn fill_window(board: &Board, pos: Pos, (dr, dc): (i32, i32), side: Stone, out: &mut [u8; WINDOW_LEN]) {
    for (i, step) in (-HALF_WINDOW..=HALF_WINDOW).enumerate() {
        let stone = board.stone_at(i32::from(pos.row) + dr * step, i32::from(pos.col) + dc * step);
        out[i] = if stone == Stone::Empty {
            b'_'
        } else if stone == side {
            b'X'
        } else {
            b'O'
        };
    }
}

/// Swap `X` and `O` in place, re-encoding the window for the other side.
#[inline]
fn mirror(window: &mut [u8; WINDOW_LEN]) {
    for b in window.iter_mut() {
        *b = match *b {
            b'X' => b'O',
            b'O' => b'X',
            other => other,
        };
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn scale(score: i32, weight: f64) -> i32 {
    (f64::from(score) * weight).round() as i32
}
