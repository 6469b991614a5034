//! Win condition checking
//!
//! Two flavours of the same test:
//! - [`check_win_at`] looks only at the lines through one cell, O(win_length)
//! - [`find_winner`] rescans every stone on the board, O(N² · win_length)
//!
//! Both count runs the same way, so for any board where the last placed
//! stone is the only one that can have created a run, they agree.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Length of the run of `stone` through `pos` along `(dr, dc)`.
///
/// `pos` itself is counted as `stone` whatever it currently holds, which lets
/// the same routine answer "would placing here win?" without mutating.
pub fn run_length(board: &Board, pos: Pos, stone: Stone, (dr, dc): (i32, i32)) -> usize {
    let mut count = 1;
    for sign in [1, -1] {
        let mut r = i32::from(pos.row) + dr * sign;
        let mut c = i32::from(pos.col) + dc * sign;
        while board.contains(r, c) && board.stone_at(r, c) == stone {
            count += 1;
            r += dr * sign;
            c += dc * sign;
        }
    }
    count
}

/// Fast win check for the stone at `pos`.
///
/// Only checks the 4 axes through `pos`. Empty cells never win.
#[inline]
pub fn check_win_at(board: &Board, pos: Pos) -> bool {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return false;
    }
    would_win(board, pos, stone)
}

/// Whether placing `stone` on `pos` would complete a winning run.
///
/// Same answer as apply + [`check_win_at`] + undo.
#[inline]
pub fn would_win(board: &Board, pos: Pos, stone: Stone) -> bool {
    let need = board.win_length();
    DIRECTIONS
        .iter()
        .any(|&dir| run_length(board, pos, stone, dir) >= need)
}

/// Full-board scan for a winning run of either side.
///
/// Returns the owner of the first run found in row-major order.
pub fn find_winner(board: &Board) -> Option<Stone> {
    if board.stone_count() < board.win_length() {
        return None;
    }
    board
        .positions()
        .find(|&pos| check_win_at(board, pos))
        .map(|pos| board.get(pos))
}

/// Cells of the winning run through `pos`, ordered along the axis.
///
/// Returns `None` when the stone at `pos` is not part of a winning run.
pub fn winning_line(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Extend in negative direction first
        let mut r = i32::from(pos.row) - dr;
        let mut c = i32::from(pos.col) - dc;
        while board.contains(r, c) && board.stone_at(r, c) == stone {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            line.insert(0, Pos::new(r as u8, c as u8));
            r -= dr;
            c -= dc;
        }

        // Extend in positive direction
        r = i32::from(pos.row) + dr;
        c = i32::from(pos.col) + dc;
        while board.contains(r, c) && board.stone_at(r, c) == stone {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            line.push(Pos::new(r as u8, c as u8));
            r += dr;
            c += dc;
        }

        if line.len() >= board.win_length() {
            return Some(line);
        }
    }
    None
}
