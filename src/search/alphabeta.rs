//! Alpha-Beta search with iterative deepening and transposition cache
//!
//! This module implements the core search algorithm for the Gomoku AI.
//! The AI is the maximizing side and the human the minimizing side; scores
//! always come from [`evaluate`], which is written from the AI's point of view.
//!
//! # Features
//!
//! - Iterative deepening, each depth a complete walk on a scoped worker thread
//! - One shared board, mutated with scoped apply/undo instead of copies
//! - Separate evaluation and interior caches (see [`TranspositionCache`])
//! - Move ordering by center distance and contact with existing stones
//! - Optional hard stop (time or node count) that discards the running depth
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::{SearchEngine, SearchSettings, TranspositionCache};
//!
//! let mut board = Board::new(15, 5);
//! board.apply(Pos::new(7, 7), Stone::Human).unwrap();
//!
//! let mut cache = TranspositionCache::new();
//! let settings = SearchSettings { max_depth: 2, ..SearchSettings::default() };
//! let mut engine = SearchEngine::new(&mut cache, settings);
//!
//! let result = engine.find_best_move(&mut board, Duration::from_secs(5)).unwrap();
//! let best = result.best_move.unwrap();
//! assert!(board.is_empty(best));
//! ```

use std::cmp::Reverse;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::board::{Board, Pos, Stone};
use crate::error::SearchError;
use crate::eval::evaluate;

use super::movegen::{generate_moves, manhattan, DEFAULT_MAX_CANDIDATES};
use super::tt::{CacheStats, EntryType, InteriorKey, TranspositionCache};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

/// Default depth ceiling for iterative deepening
pub const DEFAULT_MAX_DEPTH: u8 = 3;

/// Static search parameters, fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    /// Deepest iteration to run
    pub max_depth: u8,
    /// Candidate cap per node
    pub max_candidates: usize,
    /// Multiplier on human pattern scores
    pub defense_weight: f64,
    /// Check wins through the last move only instead of rescanning the board
    pub incremental_win_check: bool,
    /// Abort a walk in progress once this much time has passed
    pub hard_time_limit: Option<Duration>,
    /// Abort a walk in progress once this many nodes were visited in total
    pub hard_node_limit: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            defense_weight: crate::eval::DEFAULT_DEFENSE_WEIGHT,
            incremental_win_check: true,
            hard_time_limit: None,
            hard_node_limit: None,
        }
    }
}

/// Result of one alpha-beta call, used at every level of the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeResult {
    pub score: i32,
    /// Move that produced `score`; `None` at leaves and cache hits
    pub best_move: Option<Pos>,
    /// Nodes visited in this subtree, this node included
    pub nodes: u64,
}

impl NodeResult {
    #[inline]
    fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
            nodes: 1,
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` when the root is already decided or full
    pub best_move: Option<Pos>,
    /// Score of the iteration that supplied `best_move`
    pub score: i32,
    /// Deepest iteration that completed
    pub depth: u8,
    /// Nodes visited by all completed iterations
    pub nodes: u64,
    pub elapsed: Duration,
    pub cache: CacheStats,
    /// Why the last attempted iteration was thrown away, if it was
    pub discarded: Option<SearchError>,
}

/// Iterative-deepening alpha-beta driver.
///
/// Borrows the session's cache for the duration of a search; the board is
/// passed per call and restored to its original content before returning.
pub struct SearchEngine<'a> {
    cache: &'a mut TranspositionCache,
    settings: SearchSettings,
    /// Depth at which the current walk stops and evaluates
    depth_limit: u8,
    /// Nodes visited since `find_best_move` started, for the hard stop
    visited: u64,
    deadline: Option<Instant>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(cache: &'a mut TranspositionCache, settings: SearchSettings) -> Self {
        Self {
            cache,
            settings,
            depth_limit: 0,
            visited: 0,
            deadline: None,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Find the best AI move within `time_budget`.
    ///
    /// Runs complete walks at depth 1, 2, … up to `max_depth`. After each
    /// completed depth, its move replaces the incumbent only if its score is
    /// strictly greater than the best score seen so far. Because the
    /// evaluator weighs human threats more heavily, a deeper depth may score
    /// lower than a shallower one; in that case the shallower move is kept.
    ///
    /// The budget is checked between depths only. A depth that fails (hard
    /// stop, worker panic) is discarded and the last completed depth's move
    /// is returned; if no depth completed, the error is reported.
    pub fn find_best_move(
        &mut self,
        board: &mut Board,
        time_budget: Duration,
    ) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        self.visited = 0;
        self.deadline = self.settings.hard_time_limit.map(|limit| start + limit);

        let mut best_move = None;
        let mut best_score = i32::MIN;
        let mut completed = 0u8;
        let mut nodes = 0u64;
        let mut discarded = None;

        for depth in 1..=self.settings.max_depth.max(1) {
            let depth_start = Instant::now();
            let outcome = thread::scope(|s| {
                let worker = s.spawn(|| self.search_depth(board, depth));
                worker.join()
            });
            let node = match outcome {
                Ok(Ok(node)) => node,
                Ok(Err(err)) => {
                    warn!("depth {depth} discarded: {err}");
                    discarded = Some(err);
                    break;
                }
                Err(_) => {
                    let err = SearchError::WorkerPanicked { depth };
                    warn!("depth {depth} discarded: {err}");
                    discarded = Some(err);
                    break;
                }
            };

            completed = depth;
            nodes += node.nodes;
            debug!(
                "depth {depth}: score={} move={:?} nodes={} time={:?}",
                node.score,
                node.best_move,
                node.nodes,
                depth_start.elapsed()
            );

            let Some(mv) = node.best_move else {
                // Root already decided or board full: deeper walks see the same
                best_score = node.score;
                break;
            };
            if node.score > best_score {
                best_score = node.score;
                best_move = Some(mv);
            }

            if start.elapsed() > time_budget {
                break;
            }
        }

        if completed == 0 {
            return Err(SearchError::NoCompletedDepth);
        }

        Ok(SearchResult {
            best_move,
            score: best_score,
            depth: completed,
            nodes,
            elapsed: start.elapsed(),
            cache: self.cache.stats(),
            discarded,
        })
    }

    /// Run one complete walk to `depth_limit` from the root, AI to move.
    pub fn search_depth(&mut self, board: &mut Board, depth_limit: u8) -> Result<NodeResult, SearchError> {
        self.depth_limit = depth_limit;
        self.alpha_beta(board, 0, -INF, INF, true, None)
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `depth` counts plies from the root. `last_move` is the move that led
    /// to this node; when set and incremental win checking is enabled, only
    /// the lines through it are examined.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        last_move: Option<Pos>,
    ) -> Result<NodeResult, SearchError> {
        self.check_stop()?;

        let won = match (self.settings.incremental_win_check, last_move) {
            (true, Some(pos)) => board.check_win_at(pos),
            _ => board.check_win_condition(),
        };
        if won || depth >= self.depth_limit {
            return Ok(NodeResult::leaf(self.evaluate_cached(board)));
        }

        let side = if maximizing { Stone::Ai } else { Stone::Human };
        let key = InteriorKey::new(board.fingerprint(), self.depth_limit - depth, side);
        // The root needs a move, which the interior cache does not keep
        if depth > 0 {
            if let Some(score) = self.cache.probe_interior(key, alpha, beta) {
                return Ok(NodeResult::leaf(score));
            }
        }

        let mut moves = generate_moves(board, self.settings.max_candidates);
        if moves.is_empty() {
            return Ok(NodeResult::leaf(self.evaluate_cached(board)));
        }
        order_moves(board, &mut moves);

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = NodeResult {
            score: if maximizing { -INF } else { INF },
            best_move: None,
            nodes: 1,
        };

        for mv in moves {
            let child = {
                let mut placed = board
                    .place_scoped(mv, side)
                    .map_err(|_| SearchError::UnplayableMove(mv))?;
                self.alpha_beta(&mut placed, depth + 1, alpha, beta, !maximizing, Some(mv))?
            };
            best.nodes += child.nodes;

            if maximizing {
                if child.score > best.score {
                    best.score = child.score;
                    best.best_move = Some(mv);
                }
                alpha = alpha.max(child.score);
            } else {
                if child.score < best.score {
                    best.score = child.score;
                    best.best_move = Some(mv);
                }
                beta = beta.min(child.score);
            }

            if beta <= alpha {
                break;
            }
        }

        self.cache.store_interior(
            key,
            best.score,
            EntryType::classify(best.score, alpha_orig, beta_orig),
        );
        Ok(best)
    }

    /// Static evaluation through the fingerprint-keyed cache.
    fn evaluate_cached(&mut self, board: &Board) -> i32 {
        let fingerprint = board.fingerprint();
        if let Some(score) = self.cache.probe_eval(fingerprint) {
            return score;
        }
        let score = evaluate(board, self.settings.defense_weight);
        self.cache.store_eval(fingerprint, score);
        score
    }

    /// Count the node and enforce the hard limits.
    #[inline]
    fn check_stop(&mut self) -> Result<(), SearchError> {
        self.visited += 1;
        if self.settings.hard_node_limit.is_some_and(|limit| self.visited > limit) {
            return Err(SearchError::NodeLimitExceeded);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(SearchError::DeadlineExceeded);
        }
        Ok(())
    }
}

/// Ordering priority of a candidate: closer to center is higher, and cells
/// touching a stone get a bonus larger than any center-distance difference.
pub fn move_priority(board: &Board, pos: Pos) -> i32 {
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let distance = manhattan(pos, board.center()) as i32;
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let locality = if board.has_neighbor(pos) {
        2 * board.size() as i32
    } else {
        0
    };
    locality - distance
}

/// Sort candidates by descending [`move_priority`]; ties keep tier order.
pub fn order_moves(board: &Board, moves: &mut [Pos]) {
    moves.sort_by_key(|&pos| Reverse(move_priority(board, pos)));
}
