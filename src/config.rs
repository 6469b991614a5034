//! Game configuration
//!
//! A [`GameConfig`] is fixed when a session is created. It can be read from a
//! JSON file in which every field is optional; missing fields take their
//! defaults. The binary then applies command-line overrides and validates
//! the result before handing it to [`GameSession::new`](crate::GameSession::new).
//!
//! ```
//! use gomoku::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "board_size": 9, "max_depth": 2 }"#).unwrap();
//! assert_eq!(config.board_size, 9);
//! assert_eq!(config.win_length, 5);
//! assert!(config.validate().is_ok());
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_BOARD_SIZE, DEFAULT_WIN_LENGTH};
use crate::error::ConfigError;
use crate::eval::DEFAULT_DEFENSE_WEIGHT;
use crate::search::{SearchSettings, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_DEPTH};

/// Smallest supported board side
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest supported board side
pub const MAX_BOARD_SIZE: usize = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub win_length: usize,
    /// Soft budget per AI move, checked between depths
    pub think_time_secs: f64,
    pub max_depth: u8,
    pub max_candidate_moves: usize,
    pub defense_weight: f64,
    pub incremental_win_check: bool,
    /// Abort the running depth after this long
    pub hard_time_limit_secs: Option<f64>,
    /// Abort the running depth after this many nodes
    pub max_nodes: Option<u64>,
    /// AI opens new games
    pub ai_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            win_length: DEFAULT_WIN_LENGTH,
            think_time_secs: 1.0,
            max_depth: DEFAULT_MAX_DEPTH,
            max_candidate_moves: DEFAULT_MAX_CANDIDATES,
            defense_weight: DEFAULT_DEFENSE_WEIGHT,
            incremental_win_check: true,
            hard_time_limit_secs: None,
            max_nodes: None,
            ai_first: false,
        }
    }
}

impl GameConfig {
    /// Read a configuration file. The result is not validated.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(invalid(format!(
                "board_size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if !(2..=self.board_size).contains(&self.win_length) {
            return Err(invalid(format!(
                "win_length must be between 2 and board_size ({}), got {}",
                self.board_size, self.win_length
            )));
        }
        if self.max_depth == 0 {
            return Err(invalid("max_depth must be at least 1".to_string()));
        }
        if self.max_candidate_moves == 0 {
            return Err(invalid("max_candidate_moves must be at least 1".to_string()));
        }
        if !(self.think_time_secs.is_finite() && self.think_time_secs > 0.0) {
            return Err(invalid(format!(
                "think_time_secs must be positive, got {}",
                self.think_time_secs
            )));
        }
        if !(self.defense_weight.is_finite() && self.defense_weight >= 1.0) {
            return Err(invalid(format!(
                "defense_weight must be at least 1.0, got {}",
                self.defense_weight
            )));
        }
        if let Some(limit) = self.hard_time_limit_secs {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(invalid(format!("hard_time_limit_secs must be positive, got {limit}")));
            }
        }
        if self.max_nodes == Some(0) {
            return Err(invalid("max_nodes must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Soft think-time budget per AI move
    pub fn think_time(&self) -> Duration {
        Duration::try_from_secs_f64(self.think_time_secs).unwrap_or_default()
    }

    /// Search parameters derived from this configuration
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            max_depth: self.max_depth,
            max_candidates: self.max_candidate_moves,
            defense_weight: self.defense_weight,
            incremental_win_check: self.incremental_win_check,
            hard_time_limit: self
                .hard_time_limit_secs
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
            hard_node_limit: self.max_nodes,
        }
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board_size, 15);
        assert_eq!(config.win_length, 5);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_candidate_moves, 15);
        assert_eq!(config.think_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "win_length": 4, "ai_first": true }"#).unwrap();
        assert_eq!(config.win_length, 4);
        assert!(config.ai_first);
        assert_eq!(config.board_size, DEFAULT_BOARD_SIZE);
        assert!((config.defense_weight - DEFAULT_DEFENSE_WEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases = [
            GameConfig { board_size: 2, ..GameConfig::default() },
            GameConfig { board_size: 26, ..GameConfig::default() },
            GameConfig { win_length: 1, ..GameConfig::default() },
            GameConfig { board_size: 9, win_length: 10, ..GameConfig::default() },
            GameConfig { max_depth: 0, ..GameConfig::default() },
            GameConfig { max_candidate_moves: 0, ..GameConfig::default() },
            GameConfig { think_time_secs: 0.0, ..GameConfig::default() },
            GameConfig { think_time_secs: f64::NAN, ..GameConfig::default() },
            GameConfig { defense_weight: 0.5, ..GameConfig::default() },
            GameConfig { hard_time_limit_secs: Some(-1.0), ..GameConfig::default() },
            GameConfig { max_nodes: Some(0), ..GameConfig::default() },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "Accepted invalid config {config:?}"
            );
        }
    }

    #[test]
    fn test_search_settings_mapping() {
        let config = GameConfig {
            max_depth: 4,
            max_candidate_moves: 10,
            incremental_win_check: false,
            hard_time_limit_secs: Some(0.5),
            max_nodes: Some(10_000),
            ..GameConfig::default()
        };
        let settings = config.search_settings();
        assert_eq!(settings.max_depth, 4);
        assert_eq!(settings.max_candidates, 10);
        assert!(!settings.incremental_win_check);
        assert_eq!(settings.hard_time_limit, Some(Duration::from_millis(500)));
        assert_eq!(settings.hard_node_limit, Some(10_000));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("gomoku-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "board_size": 11, "think_time_secs": 0.25 }"#).unwrap();
        let config = GameConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.board_size, 11);
        assert_eq!(config.think_time(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_errors() {
        let missing = std::env::temp_dir().join("gomoku-config-does-not-exist.json");
        assert!(matches!(GameConfig::load(&missing), Err(ConfigError::Io { .. })));

        let path = std::env::temp_dir().join(format!("gomoku-config-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ board_size = 11 }").unwrap();
        let result = GameConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
