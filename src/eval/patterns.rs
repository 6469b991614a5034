//! Pattern table for window evaluation
//!
//! Patterns are written from the point of view of the side being scored:
//! `X` is one of its stones, `O` an opposing stone, `_` an empty cell (or
//! the board edge). The same table is matched for both sides, which keeps
//! the table itself antisymmetric; any bias toward defense is applied
//! afterwards by the evaluator's defense weight.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// A completed winning run on the board
    pub const WIN: i32 = 1_000_000;

    // Winning patterns
    /// Five in a row
    pub const FIVE: i32 = 10_000;

    // Strong attacking patterns
    /// Open four: _XXXX_
    pub const OPEN_FOUR: i32 = 5_000;
    /// Simple four: XXXX_ or _XXXX (one way to complete)
    pub const FOUR: i32 = 1_000;
    /// Broken four: XXX_X, X_XXX, XX_XX
    pub const BROKEN_FOUR: i32 = 500;

    // Moderate threats
    /// Open three: _XXX__ or __XXX_
    pub const OPEN_THREE: i32 = 300;
    /// Broken three: _XX_X_ or _X_XX_
    pub const BROKEN_THREE: i32 = 50;

    // Building patterns
    /// Open two: _XX__ or __XX_
    pub const OPEN_TWO: i32 = 10;
    /// Blocked two: OXX__ or __XXO
    pub const BLOCKED_TWO: i32 = 2;
}

/// Ranked table of `(pattern, score)` pairs, strongest first.
///
/// Every pattern found as a substring of a window contributes its score;
/// overlapping matches are not exclusive.
pub const PATTERNS: [(&[u8], i32); 16] = [
    (b"XXXXX", PatternScore::FIVE),
    (b"_XXXX_", PatternScore::OPEN_FOUR),
    (b"XXXX_", PatternScore::FOUR),
    (b"_XXXX", PatternScore::FOUR),
    (b"XXX_X", PatternScore::BROKEN_FOUR),
    (b"X_XXX", PatternScore::BROKEN_FOUR),
    (b"XX_XX", PatternScore::BROKEN_FOUR),
    (b"_XXX__", PatternScore::OPEN_THREE),
    (b"__XXX_", PatternScore::OPEN_THREE),
    (b"_XX_X_", PatternScore::BROKEN_THREE),
    (b"_X_XX_", PatternScore::BROKEN_THREE),
    (b"_XX__", PatternScore::OPEN_TWO),
    (b"__XX_", PatternScore::OPEN_TWO),
    (b"OXX__", PatternScore::BLOCKED_TWO),
    (b"__XXO", PatternScore::BLOCKED_TWO),
    (b"_X_X_", PatternScore::BLOCKED_TWO),
];

/// Sum the scores of every table pattern that occurs in `window`.
///
/// `window` must already be encoded from the scored side's point of view.
pub fn score_window(window: &[u8]) -> i32 {
    PATTERNS
        .iter()
        .filter(|(pattern, _)| contains(window, pattern))
        .map(|&(_, score)| score)
        .sum()
}

#[inline]
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
