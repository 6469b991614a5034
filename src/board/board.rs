//! Board structure with apply/undo and incremental fingerprint

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use super::zobrist::ZobristTable;
use super::{Pos, Stone};
use crate::error::{GameError, MoveRejection};
use crate::rules;

/// Square game board of `size` x `size` cells.
///
/// The board is mutated in place by the search: every `apply` is paired with
/// an `undo` of the same cell in LIFO order. `place_scoped` enforces the
/// pairing with a guard.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Stone>,
    stone_count: usize,
    /// Zobrist hash of the current content
    fingerprint: u64,
    zobrist: Arc<ZobristTable>,
    /// Applied moves, most recent last
    history: Vec<Pos>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Callers validate `size` and `win_length` beforehand (see
    /// [`GameConfig::validate`](crate::GameConfig::validate)).
    pub fn new(size: usize, win_length: usize) -> Self {
        debug_assert!(size > 0 && size <= u8::MAX as usize);
        Self {
            size,
            win_length,
            cells: vec![Stone::Empty; size * size],
            stone_count: 0,
            fingerprint: 0,
            zobrist: Arc::new(ZobristTable::new(size)),
            history: Vec::with_capacity(size * size),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Check whether signed coordinates fall on the board
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        let n = self.size as i32;
        row >= 0 && row < n && col >= 0 && col < n
    }

    /// Convert signed coordinates into a position, rejecting off-board ones.
    pub fn pos_at(&self, row: i32, col: i32) -> Result<Pos, GameError> {
        if !self.contains(row, col) {
            return Err(GameError::InvalidMove {
                row,
                col,
                reason: MoveRejection::OutOfBounds,
            });
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        Ok(Pos::new(row as u8, col as u8))
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.row as usize * self.size + pos.col as usize
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[self.index(pos)]
    }

    /// Get stone at signed coordinates; off-board cells read as `Empty`.
    #[inline]
    pub fn stone_at(&self, row: i32, col: i32) -> Stone {
        if self.contains(row, col) {
            self.cells[row as usize * self.size + col as usize]
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place `stone` at `pos`.
    ///
    /// Fails with `InvalidMove` when `pos` is off the board or occupied; the
    /// board is left unchanged in that case.
    pub fn apply(&mut self, pos: Pos, stone: Stone) -> Result<(), GameError> {
        debug_assert!(stone != Stone::Empty, "apply needs a side, not Empty");
        if !self.contains(i32::from(pos.row), i32::from(pos.col)) {
            return Err(GameError::InvalidMove {
                row: i32::from(pos.row),
                col: i32::from(pos.col),
                reason: MoveRejection::OutOfBounds,
            });
        }
        let idx = self.index(pos);
        if self.cells[idx] != Stone::Empty {
            return Err(GameError::InvalidMove {
                row: i32::from(pos.row),
                col: i32::from(pos.col),
                reason: MoveRejection::Occupied,
            });
        }
        self.cells[idx] = stone;
        self.stone_count += 1;
        self.fingerprint = self.zobrist.toggle(self.fingerprint, idx, stone);
        self.history.push(pos);
        Ok(())
    }

    /// Remove the stone at `pos`.
    ///
    /// Must undo the most recent pending `apply`.
    pub fn undo(&mut self, pos: Pos) {
        debug_assert_eq!(self.history.last(), Some(&pos), "undo out of LIFO order");
        let idx = self.index(pos);
        let stone = self.cells[idx];
        if stone == Stone::Empty {
            return;
        }
        self.cells[idx] = Stone::Empty;
        self.stone_count -= 1;
        self.fingerprint = self.zobrist.toggle(self.fingerprint, idx, stone);
        self.history.pop();
    }

    /// Place a stone and get a guard that undoes it when dropped.
    ///
    /// The guard dereferences to the board, so the search recurses through it
    /// and the stone comes off on every exit path, including `?` returns.
    pub fn place_scoped(&mut self, pos: Pos, stone: Stone) -> Result<Placed<'_>, GameError> {
        self.apply(pos, stone)?;
        Ok(Placed { board: self, pos })
    }

    /// Content hash of the grid
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stone_count
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count == self.cells.len()
    }

    /// Check if board has no stones
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stone_count == 0
    }

    /// Applied moves, oldest first
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Center cell (lower-right of the middle for even sizes)
    #[allow(clippy::cast_possible_truncation)]
    pub fn center(&self) -> Pos {
        let c = (self.size / 2) as u8;
        Pos::new(c, c)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let n = self.size;
        #[allow(clippy::cast_possible_truncation)]
        (0..n * n).map(move |i| Pos::new((i / n) as u8, (i % n) as u8))
    }

    /// Whether any of the 8 surrounding cells holds a stone
    pub fn has_neighbor(&self, pos: Pos) -> bool {
        let (r, c) = (i32::from(pos.row), i32::from(pos.col));
        for dr in -1..=1 {
            for dc in -1..=1 {
                if (dr, dc) != (0, 0) && self.stone_at(r + dr, c + dc) != Stone::Empty {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the stone at `pos` is part of a winning run
    #[inline]
    pub fn check_win_at(&self, pos: Pos) -> bool {
        rules::check_win_at(self, pos)
    }

    /// Whether either side has a winning run anywhere on the board
    pub fn check_win_condition(&self) -> bool {
        rules::find_winner(self).is_some()
    }
}

/// A stone placed through [`Board::place_scoped`]; removed again on drop.
pub struct Placed<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl Placed<'_> {
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Placed<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        self.board.undo(self.pos);
    }
}
