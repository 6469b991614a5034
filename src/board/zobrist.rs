//! Zobrist keys for board fingerprints
//!
//! A fingerprint is the XOR of one random key per occupied (cell, stone)
//! pair, so placing and removing a stone are the same O(1) update.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Stone, ZobristTable};
//!
//! let zt = ZobristTable::new(15);
//! let placed = zt.toggle(0, 7 * 15 + 7, Stone::Ai);
//! assert_ne!(placed, 0);
//! // Removing the stone is the same XOR
//! assert_eq!(zt.toggle(placed, 7 * 15 + 7, Stone::Ai), 0);
//! ```

use super::Stone;

/// Random keys for every cell of a square board.
///
/// The fingerprint covers board content only. Side to move and remaining
/// search depth are part of the interior cache key, not of the fingerprint.
#[derive(Debug)]
pub struct ZobristTable {
    human: Vec<u64>,
    ai: Vec<u64>,
}

impl ZobristTable {
    /// Build keys for a `size` x `size` board with deterministic values.
    ///
    /// Uses a fixed-seed LCG so fingerprints are reproducible across runs.
    #[must_use]
    pub fn new(size: usize) -> Self {
        // Constants from Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            // Low LCG bits are weak; fold the high half down.
            seed ^ (seed >> 29)
        };

        let cells = size * size;
        let mut human = Vec::with_capacity(cells);
        let mut ai = Vec::with_capacity(cells);
        for _ in 0..cells {
            human.push(next_rand());
            ai.push(next_rand());
        }

        Self { human, ai }
    }

    /// XOR the key of `stone` at cell `index` into `hash`.
    ///
    /// XOR is its own inverse, so this serves both placement and removal.
    #[inline]
    #[must_use]
    pub fn toggle(&self, hash: u64, index: usize, stone: Stone) -> u64 {
        match stone {
            Stone::Human => hash ^ self.human[index],
            Stone::Ai => hash ^ self.ai[index],
            Stone::Empty => hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_keys_distinct_per_side() {
        let zt = ZobristTable::new(15);
        for idx in 0..225 {
            assert_ne!(zt.toggle(0, idx, Stone::Human), zt.toggle(0, idx, Stone::Ai));
        }
    }

    #[test]
    fn test_zobrist_deterministic() {
        let a = ZobristTable::new(9);
        let b = ZobristTable::new(9);
        assert_eq!(a.toggle(0, 40, Stone::Ai), b.toggle(0, 40, Stone::Ai));
    }

    #[test]
    fn test_zobrist_order_independent() {
        let zt = ZobristTable::new(15);
        let h1 = zt.toggle(zt.toggle(0, 3, Stone::Human), 100, Stone::Ai);
        let h2 = zt.toggle(zt.toggle(0, 100, Stone::Ai), 3, Stone::Human);
        assert_eq!(h1, h2, "Transposed move orders must give the same fingerprint");
    }

    #[test]
    fn test_zobrist_empty_is_identity() {
        let zt = ZobristTable::new(5);
        assert_eq!(zt.toggle(42, 7, Stone::Empty), 42);
    }
}
