//! Game session: one board, one cache, one configuration
//!
//! The session is the boundary the front-end talks to. It validates human
//! moves, runs the AI search, relays results and keeps track of the game
//! outcome. Turn order is left to the caller, so a driver may let the AI open
//! the game by calling [`GameSession::compute_ai_move`] first.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use gomoku::{GameConfig, GameSession, GameStatus};
//!
//! let config = GameConfig { max_depth: 2, ..GameConfig::default() };
//! let mut session = GameSession::new(config).unwrap();
//!
//! let won = session.apply_player_move(7, 7).unwrap();
//! assert!(!won);
//!
//! let reply = session.compute_ai_move(Duration::from_secs(5)).unwrap().unwrap();
//! assert!(!reply.wins);
//! assert_eq!(session.status(), GameStatus::InProgress);
//! ```

use std::time::Duration;

use log::info;

use crate::board::{Board, Pos, Stone};
use crate::config::GameConfig;
use crate::error::{ConfigError, GameError};
use crate::rules::winning_line;
use crate::search::{CacheStats, SearchEngine, SearchResult, TranspositionCache};

/// Outcome state of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Stone),
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// An AI move that has already been placed on the session board.
#[derive(Debug, Clone)]
pub struct AiMove {
    pub pos: Pos,
    /// Whether this move completed a winning run
    pub wins: bool,
    pub report: SearchResult,
}

pub struct GameSession {
    config: GameConfig,
    board: Board,
    cache: TranspositionCache,
    status: GameStatus,
    last_report: Option<SearchResult>,
}

impl GameSession {
    /// Start a session with an empty board. Fails if `config` is out of range.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.board_size, config.win_length),
            cache: TranspositionCache::new(),
            status: GameStatus::InProgress,
            last_report: None,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Moves in play order
    pub fn history(&self) -> &[Pos] {
        self.board.history()
    }

    /// Report of the most recent AI search, cleared by reset and take-back
    pub fn last_report(&self) -> Option<&SearchResult> {
        self.last_report.as_ref()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Cells of the winning run, once the game has been won.
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        match self.status {
            GameStatus::Won(_) => self
                .board
                .last_move()
                .and_then(|pos| winning_line(&self.board, pos)),
            _ => None,
        }
    }

    /// Place a human stone at `(row, col)` and report whether it wins.
    ///
    /// Out-of-bounds or occupied cells return [`GameError::InvalidMove`] and
    /// leave the session untouched.
    pub fn apply_player_move(&mut self, row: i32, col: i32) -> Result<bool, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        let pos = self.board.pos_at(row, col)?;
        self.board.apply(pos, Stone::Human)?;

        let wins = self.board.check_win_at(pos);
        self.update_status(pos, Stone::Human, wins);
        Ok(wins)
    }

    /// Search for the AI's reply, place it and return it.
    ///
    /// `Ok(None)` means there was no legal move left: the game is a draw.
    pub fn compute_ai_move(&mut self, budget: Duration) -> Result<Option<AiMove>, GameError> {
        if let GameStatus::Won(_) = self.status {
            return Err(GameError::GameOver);
        }

        let mut engine = SearchEngine::new(&mut self.cache, self.config.search_settings());
        let report = engine.find_best_move(&mut self.board, budget)?;

        let Some(pos) = report.best_move else {
            info!("no legal move left, game drawn");
            self.status = GameStatus::Draw;
            self.last_report = Some(report);
            return Ok(None);
        };

        self.board.apply(pos, Stone::Ai)?;
        let wins = self.board.check_win_at(pos);
        info!(
            "AI plays {pos}: score={} depth={} nodes={} time={:?}",
            report.score, report.depth, report.nodes, report.elapsed
        );
        self.update_status(pos, Stone::Ai, wins);
        self.last_report = Some(report.clone());

        Ok(Some(AiMove { pos, wins, report }))
    }

    /// Clear the board and the cache together and start over.
    pub fn reset_game(&mut self) {
        self.board = Board::new(self.config.board_size, self.config.win_length);
        self.cache.clear();
        self.status = GameStatus::InProgress;
        self.last_report = None;
        info!("new game on a {0}x{0} board", self.config.board_size);
    }

    /// Take back the last human move and the AI reply that followed it.
    ///
    /// Returns the number of stones removed. Cache entries stay valid since
    /// they are keyed by board content.
    pub fn take_back(&mut self) -> usize {
        let mut removed = 0;
        while let Some(pos) = self.board.last_move() {
            let stone = self.board.get(pos);
            self.board.undo(pos);
            removed += 1;
            if stone == Stone::Human {
                break;
            }
        }
        if removed > 0 {
            self.status = GameStatus::InProgress;
            self.last_report = None;
        }
        removed
    }

    fn update_status(&mut self, pos: Pos, stone: Stone, wins: bool) {
        if wins {
            info!("{stone:?} wins with {pos}");
            self.status = GameStatus::Won(stone);
        } else if self.board.is_full() {
            info!("board full, game drawn");
            self.status = GameStatus::Draw;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoveRejection;

    fn session(config: GameConfig) -> GameSession {
        GameSession::new(config).unwrap()
    }

    fn quick() -> GameConfig {
        GameConfig {
            max_depth: 2,
            ..GameConfig::default()
        }
    }

    const BUDGET: Duration = Duration::from_secs(30);

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            board_size: 40,
            ..GameConfig::default()
        };
        assert!(GameSession::new(config).is_err());
    }

    #[test]
    fn test_invalid_moves_leave_state_unchanged() {
        let mut game = session(quick());
        game.apply_player_move(7, 7).unwrap();
        let fingerprint = game.board().fingerprint();

        for (row, col) in [(-1, 3), (3, 15), (15, 0)] {
            let err = game.apply_player_move(row, col).unwrap_err();
            assert!(matches!(
                err,
                GameError::InvalidMove { reason: MoveRejection::OutOfBounds, .. }
            ));
        }
        let err = game.apply_player_move(7, 7).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidMove { row: 7, col: 7, reason: MoveRejection::Occupied }
        ));

        assert_eq!(game.board().fingerprint(), fingerprint);
        assert_eq!(game.history(), &[Pos::new(7, 7)]);
    }

    #[test]
    fn test_ai_opens_at_center() {
        let mut game = session(quick());
        let reply = game.compute_ai_move(BUDGET).unwrap().unwrap();
        assert_eq!(reply.pos, Pos::new(7, 7));
        assert_eq!(game.board().get(Pos::new(7, 7)), Stone::Ai);
    }

    #[test]
    fn test_ai_blocks_open_four() {
        let mut game = session(quick());
        for col in 5..9 {
            game.apply_player_move(7, col).unwrap();
        }
        let reply = game.compute_ai_move(BUDGET).unwrap().unwrap();
        assert!(
            reply.pos == Pos::new(7, 4) || reply.pos == Pos::new(7, 9),
            "AI played {} instead of blocking",
            reply.pos
        );
        assert!(!reply.wins);
    }

    #[test]
    fn test_ai_completes_own_four() {
        let mut game = session(quick());
        for (r, c) in [(7, 4), (7, 5), (7, 6), (7, 7)] {
            game.board.apply(Pos::new(r, c), Stone::Ai).unwrap();
        }
        game.apply_player_move(7, 3).unwrap();

        let reply = game.compute_ai_move(BUDGET).unwrap().unwrap();
        assert_eq!(reply.pos, Pos::new(7, 8));
        assert!(reply.wins);
        assert_eq!(game.status(), GameStatus::Won(Stone::Ai));
        assert_eq!(game.winning_line().map(|line| line.len()), Some(5));
        assert!(matches!(game.apply_player_move(0, 0), Err(GameError::GameOver)));
    }

    #[test]
    fn test_human_win_is_reported() {
        let mut game = session(quick());
        for col in 0..4 {
            assert!(!game.apply_player_move(0, col).unwrap());
        }
        assert!(game.apply_player_move(0, 4).unwrap());
        assert_eq!(game.status(), GameStatus::Won(Stone::Human));
        assert!(matches!(game.compute_ai_move(BUDGET), Err(GameError::GameOver)));
    }

    #[test]
    fn test_last_cell_gives_draw() {
        let config = GameConfig {
            board_size: 3,
            win_length: 3,
            ..quick()
        };
        let mut game = session(config);
        // H A H / H A A / A H _  : the AI's last cell completes no line
        let layout = [
            ((0, 0), Stone::Human),
            ((0, 1), Stone::Ai),
            ((0, 2), Stone::Human),
            ((1, 0), Stone::Human),
            ((1, 1), Stone::Ai),
            ((1, 2), Stone::Ai),
            ((2, 0), Stone::Ai),
            ((2, 1), Stone::Human),
        ];
        for ((r, c), stone) in layout {
            game.board.apply(Pos::new(r, c), stone).unwrap();
        }

        let reply = game.compute_ai_move(BUDGET).unwrap().unwrap();
        assert_eq!(reply.pos, Pos::new(2, 2));
        assert!(!reply.wins);
        assert_eq!(game.status(), GameStatus::Draw);

        // Nothing left to play
        assert!(game.compute_ai_move(BUDGET).unwrap().is_none());
    }

    #[test]
    fn test_reset_clears_board_and_cache() {
        let mut game = session(quick());
        game.apply_player_move(7, 7).unwrap();
        game.compute_ai_move(BUDGET).unwrap();
        assert!(game.cache_stats().eval_entries > 0);

        game.reset_game();
        assert!(game.board().is_board_empty());
        assert_eq!(game.cache_stats(), CacheStats::default());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.last_report().is_none());
    }

    #[test]
    fn test_take_back_removes_full_turn() {
        let mut game = session(quick());
        game.apply_player_move(7, 7).unwrap();
        game.compute_ai_move(BUDGET).unwrap();
        game.apply_player_move(3, 3).unwrap();
        game.compute_ai_move(BUDGET).unwrap();
        assert_eq!(game.history().len(), 4);

        assert_eq!(game.take_back(), 2);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.board().get(Pos::new(3, 3)), Stone::Empty);

        assert_eq!(game.take_back(), 2);
        assert_eq!(game.take_back(), 0);
        assert!(game.board().is_board_empty());
    }

    #[test]
    fn test_take_back_reopens_won_game() {
        let mut game = session(quick());
        for col in 0..5 {
            game.apply_player_move(0, col).unwrap();
        }
        assert!(game.status().is_over());
        assert_eq!(game.take_back(), 1);
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}
