//! Game state management for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{error, warn};

use crate::board::{Board, Pos};
use crate::config::GameConfig;
use crate::error::{ConfigError, GameError};
use crate::search::SearchResult;
use crate::session::{AiMove, GameSession, GameStatus};

type AiReply = (GameSession, Result<Option<AiMove>, GameError>);

/// AI computation state
pub enum AiState {
    Idle,
    /// The session is away on a worker thread and comes back with the reply
    Thinking {
        receiver: Receiver<AiReply>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        self.start_time = None;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Front-end view of a [`GameSession`].
pub struct GameState {
    config: GameConfig,
    /// `None` while the AI worker owns the session
    session: Option<GameSession>,
    /// Board as it was when the session left, drawn while the AI thinks
    snapshot: Board,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub last_ai_move: Option<Pos>,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let session = GameSession::new(config.clone())?;
        let mut state = Self {
            snapshot: session.board().clone(),
            session: Some(session),
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            last_ai_move: None,
            message: None,
            config,
        };
        if state.config.ai_first {
            state.start_ai_thinking();
        }
        Ok(state)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        self.session.as_ref().map_or(&self.snapshot, GameSession::board)
    }

    pub fn status(&self) -> GameStatus {
        self.session
            .as_ref()
            .map_or(GameStatus::InProgress, GameSession::status)
    }

    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        self.session.as_ref().and_then(GameSession::winning_line)
    }

    pub fn last_report(&self) -> Option<&SearchResult> {
        self.session.as_ref().and_then(GameSession::last_report)
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Human move at `pos`, followed by the AI reply unless the game ended.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        let Some(session) = self.session.as_mut() else {
            return Err("AI is thinking".to_string());
        };

        session
            .apply_player_move(i32::from(pos.row), i32::from(pos.col))
            .map_err(|err| err.to_string())?;
        self.move_timer.stop();
        self.message = None;

        if !session.status().is_over() {
            self.start_ai_thinking();
        }
        Ok(())
    }

    /// Hand the session to a worker thread and let it search.
    pub fn start_ai_thinking(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        self.snapshot = session.board().clone();
        let budget = self.config.think_time();

        let (tx, rx) = channel();
        thread::spawn(move || {
            let result = session.compute_ai_move(budget);
            let _ = tx.send((session, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let (reply, elapsed) = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(reply) => (reply, start_time.elapsed()),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    error!("AI worker died, starting a new game");
                    self.recover();
                    return;
                }
            },
            AiState::Idle => return,
        };

        let (session, result) = reply;
        self.session = Some(session);
        self.ai_state = AiState::Idle;
        self.move_timer.set_ai_time(elapsed);

        match result {
            Ok(Some(ai_move)) => {
                self.last_ai_move = Some(ai_move.pos);
                if let Some(reason) = ai_move.report.discarded {
                    self.message = Some(format!("Search cut short: {reason}"));
                }
                self.move_timer.start();
            }
            Ok(None) => self.message = Some("No moves left".to_string()),
            Err(err) => {
                warn!("AI move failed: {err}");
                self.message = Some(err.to_string());
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Start over, with the AI opening if `ai_first`.
    pub fn new_game(&mut self, ai_first: bool) {
        let Some(session) = self.session.as_mut() else {
            self.message = Some("Wait for the AI to finish".to_string());
            return;
        };
        session.reset_game();
        self.last_ai_move = None;
        self.message = None;
        self.move_timer = MoveTimer::default();
        if ai_first {
            self.start_ai_thinking();
        }
    }

    /// Take back the last human move and the AI reply to it.
    pub fn take_back(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.take_back() > 0 {
            self.last_ai_move = None;
            self.message = None;
            self.move_timer.start();
        }
    }

    /// The worker vanished with the session; rebuild from the configuration.
    fn recover(&mut self) {
        self.ai_state = AiState::Idle;
        match GameSession::new(self.config.clone()) {
            Ok(session) => {
                self.snapshot = session.board().clone();
                self.session = Some(session);
                self.message = Some("AI error, new game started".to_string());
            }
            Err(err) => self.message = Some(err.to_string()),
        }
        self.last_ai_move = None;
    }
}
