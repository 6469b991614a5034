//! Transposition cache for evaluation and search results
//!
//! Two classes of entry live here and are never mixed up:
//!
//! - **Evaluation entries**, keyed by fingerprint alone. The static evaluator
//!   only looks at board content, so its score for a position is valid
//!   forever.
//! - **Interior entries**, keyed by fingerprint, remaining depth and side to
//!   move. They hold the value of a bounded-depth alpha-beta walk from that
//!   node, which is only meaningful for that exact remaining depth.
//!
//! Neither map evicts. The owning session clears both together.
//!
//! # Example
//!
//! ```
//! use gomoku::board::Stone;
//! use gomoku::search::{EntryType, InteriorKey, TranspositionCache};
//!
//! let mut cache = TranspositionCache::new();
//! cache.store_eval(0xABCD, 120);
//! assert_eq!(cache.probe_eval(0xABCD), Some(120));
//!
//! let key = InteriorKey::new(0xABCD, 2, Stone::Ai);
//! cache.store_interior(key, 80, EntryType::Exact);
//! assert_eq!(cache.probe_interior(key, -1000, 1000), Some(80));
//!
//! // A different remaining depth is a different key
//! assert_eq!(cache.probe_interior(InteriorKey::new(0xABCD, 3, Stone::Ai), -1000, 1000), None);
//! ```

use std::collections::HashMap;

use crate::board::Stone;

/// How an interior score relates to the true value of the sub-search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside its window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a fail-soft result against the window it was searched with.
    #[inline]
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Key of an interior search entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteriorKey {
    pub fingerprint: u64,
    /// Plies left before the walk bottoms out at this node
    pub remaining_depth: u8,
    /// Side to move at this node
    pub side: Stone,
}

impl InteriorKey {
    #[inline]
    pub fn new(fingerprint: u64, remaining_depth: u8, side: Stone) -> Self {
        Self {
            fingerprint,
            remaining_depth,
            side,
        }
    }
}

/// Interior search entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteriorEntry {
    pub score: i32,
    pub entry_type: EntryType,
}

/// Hit/miss counters and sizes of both maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub eval_entries: usize,
    pub interior_entries: usize,
    pub eval_hits: u64,
    pub eval_misses: u64,
    pub interior_hits: u64,
    pub interior_misses: u64,
}

impl CacheStats {
    /// Evaluation hit rate in percent
    pub fn eval_hit_rate(&self) -> f64 {
        rate(self.eval_hits, self.eval_misses)
    }

    /// Interior hit rate in percent
    pub fn interior_hit_rate(&self) -> f64 {
        rate(self.interior_hits, self.interior_misses)
    }
}

#[allow(clippy::cast_precision_loss)]
fn rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

/// Session-scoped cache of evaluation and interior search results.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    eval: HashMap<u64, i32>,
    interior: HashMap<InteriorKey, InteriorEntry>,
    stats: CacheStats,
}

impl TranspositionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the static evaluation of a position.
    pub fn probe_eval(&mut self, fingerprint: u64) -> Option<i32> {
        let hit = self.eval.get(&fingerprint).copied();
        if hit.is_some() {
            self.stats.eval_hits += 1;
        } else {
            self.stats.eval_misses += 1;
        }
        hit
    }

    pub fn store_eval(&mut self, fingerprint: u64, score: i32) {
        self.eval.insert(fingerprint, score);
    }

    /// Look up an interior value usable inside the window `(alpha, beta)`.
    ///
    /// Exact entries always answer. Bound entries answer only when they
    /// already decide the node for this window: a lower bound at or above
    /// `beta`, or an upper bound at or below `alpha`.
    pub fn probe_interior(&mut self, key: InteriorKey, alpha: i32, beta: i32) -> Option<i32> {
        let usable = self.interior.get(&key).and_then(|entry| match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        });
        if usable.is_some() {
            self.stats.interior_hits += 1;
        } else {
            self.stats.interior_misses += 1;
        }
        usable
    }

    /// Store an interior value.
    ///
    /// An exact entry is never overwritten by a bound for the same key.
    pub fn store_interior(&mut self, key: InteriorKey, score: i32, entry_type: EntryType) {
        let entry = InteriorEntry { score, entry_type };
        self.interior
            .entry(key)
            .and_modify(|existing| {
                if existing.entry_type != EntryType::Exact {
                    *existing = entry;
                }
            })
            .or_insert(entry);
    }

    /// Raw interior entry, without window filtering or stats.
    pub fn interior_entry(&self, key: InteriorKey) -> Option<InteriorEntry> {
        self.interior.get(&key).copied()
    }

    /// Drop every entry of both classes and reset the counters.
    pub fn clear(&mut self) {
        self.eval.clear();
        self.interior.clear();
        self.stats = CacheStats::default();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            eval_entries: self.eval.len(),
            interior_entries: self.interior.len(),
            ..self.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_store_probe() {
        let mut cache = TranspositionCache::new();
        assert_eq!(cache.probe_eval(7), None);
        cache.store_eval(7, -450);
        assert_eq!(cache.probe_eval(7), Some(-450));

        let stats = cache.stats();
        assert_eq!(stats.eval_hits, 1);
        assert_eq!(stats.eval_misses, 1);
        assert_eq!(stats.eval_entries, 1);
    }

    #[test]
    fn test_eval_and_interior_are_separate() {
        let mut cache = TranspositionCache::new();
        cache.store_eval(42, 100);
        // Same fingerprint, but an interior lookup must not see the eval score
        assert_eq!(cache.probe_interior(InteriorKey::new(42, 0, Stone::Ai), -1000, 1000), None);

        cache.store_interior(InteriorKey::new(99, 2, Stone::Human), 5, EntryType::Exact);
        assert_eq!(cache.probe_eval(99), None);
    }

    #[test]
    fn test_interior_depth_must_match() {
        let mut cache = TranspositionCache::new();
        cache.store_interior(InteriorKey::new(1, 1, Stone::Ai), 300, EntryType::Exact);
        assert_eq!(cache.probe_interior(InteriorKey::new(1, 2, Stone::Ai), -1000, 1000), None);
        assert_eq!(cache.probe_interior(InteriorKey::new(1, 0, Stone::Ai), -1000, 1000), None);
        assert_eq!(cache.probe_interior(InteriorKey::new(1, 1, Stone::Ai), -1000, 1000), Some(300));
    }

    #[test]
    fn test_interior_side_must_match() {
        let mut cache = TranspositionCache::new();
        cache.store_interior(InteriorKey::new(1, 1, Stone::Ai), 300, EntryType::Exact);
        assert_eq!(cache.probe_interior(InteriorKey::new(1, 1, Stone::Human), -1000, 1000), None);
    }

    #[test]
    fn test_lower_bound_cutoff() {
        let mut cache = TranspositionCache::new();
        let key = InteriorKey::new(5, 3, Stone::Ai);
        cache.store_interior(key, 500, EntryType::LowerBound);

        // Usable when the bound already reaches beta
        assert_eq!(cache.probe_interior(key, 0, 400), Some(500));
        // Not usable when beta is higher than the bound
        assert_eq!(cache.probe_interior(key, 0, 600), None);
    }

    #[test]
    fn test_upper_bound_cutoff() {
        let mut cache = TranspositionCache::new();
        let key = InteriorKey::new(6, 3, Stone::Human);
        cache.store_interior(key, -200, EntryType::UpperBound);

        assert_eq!(cache.probe_interior(key, -100, 100), Some(-200));
        assert_eq!(cache.probe_interior(key, -300, 100), None);
    }

    #[test]
    fn test_exact_not_replaced_by_bound() {
        let mut cache = TranspositionCache::new();
        let key = InteriorKey::new(8, 2, Stone::Ai);
        cache.store_interior(key, 10, EntryType::Exact);
        cache.store_interior(key, 999, EntryType::LowerBound);
        assert_eq!(
            cache.interior_entry(key),
            Some(InteriorEntry { score: 10, entry_type: EntryType::Exact })
        );

        let other = InteriorKey::new(9, 2, Stone::Ai);
        cache.store_interior(other, 50, EntryType::UpperBound);
        cache.store_interior(other, 20, EntryType::Exact);
        assert_eq!(cache.interior_entry(other).map(|e| e.entry_type), Some(EntryType::Exact));
    }

    #[test]
    fn test_classify() {
        assert_eq!(EntryType::classify(-5, 0, 10), EntryType::UpperBound);
        assert_eq!(EntryType::classify(0, 0, 10), EntryType::UpperBound);
        assert_eq!(EntryType::classify(5, 0, 10), EntryType::Exact);
        assert_eq!(EntryType::classify(10, 0, 10), EntryType::LowerBound);
    }

    #[test]
    fn test_clear_resets_both_classes() {
        let mut cache = TranspositionCache::new();
        cache.store_eval(1, 1);
        cache.store_interior(InteriorKey::new(1, 1, Stone::Ai), 1, EntryType::Exact);
        let _ = cache.probe_eval(1);

        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.probe_eval(1), None);
        assert_eq!(cache.interior_entry(InteriorKey::new(1, 1, Stone::Ai)), None);
    }

    #[test]
    fn test_hit_rates() {
        let mut cache = TranspositionCache::new();
        assert!((cache.stats().eval_hit_rate() - 0.0).abs() < f64::EPSILON);
        cache.store_eval(3, 0);
        let _ = cache.probe_eval(3);
        let _ = cache.probe_eval(4);
        assert!((cache.stats().eval_hit_rate() - 50.0).abs() < 1e-9);
    }
}
