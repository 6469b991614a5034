//! Gomoku GUI
//!
//! Play K-in-a-row against the alpha-beta AI in a desktop window.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use gomoku::ui::{GameState, GomokuApp};
use gomoku::{ConfigError, GameConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells per board side
    #[arg(long)]
    board_size: Option<usize>,

    /// Stones in a row needed to win
    #[arg(long)]
    win_length: Option<usize>,

    /// Think time per AI move in seconds
    #[arg(short, long)]
    think_time: Option<f64>,

    /// Deepest search iteration
    #[arg(long)]
    max_depth: Option<u8>,

    /// Candidate moves per search node
    #[arg(long)]
    max_candidates: Option<usize>,

    /// Multiplier on the human's pattern scores
    #[arg(long)]
    defense_weight: Option<f64>,

    /// Abort a running search depth after this many seconds
    #[arg(long)]
    hard_time_limit: Option<f64>,

    /// Abort a running search depth after this many nodes
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Rescan the whole board for wins instead of the last move's lines
    #[arg(long)]
    full_win_scan: bool,

    /// Let the AI open the game
    #[arg(long)]
    ai_first: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Load the configuration file, if any, and apply flag overrides.
    fn into_config(self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.board_size {
            config.board_size = size;
        }
        if let Some(length) = self.win_length {
            config.win_length = length;
        }
        if let Some(secs) = self.think_time {
            config.think_time_secs = secs;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(cap) = self.max_candidates {
            config.max_candidate_moves = cap;
        }
        if let Some(weight) = self.defense_weight {
            config.defense_weight = weight;
        }
        if let Some(secs) = self.hard_time_limit {
            config.hard_time_limit_secs = Some(secs);
        }
        if let Some(nodes) = self.max_nodes {
            config.max_nodes = Some(nodes);
        }
        if self.full_win_scan {
            config.incremental_win_check = false;
        }
        if self.ai_first {
            config.ai_first = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level))
        .init();

    let state = match args.into_config().and_then(GameState::new) {
        Ok(state) => state,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let config = state.config();
    info!(
        "{0}x{0} board, {1} to win, depth {2}, {3}s per move",
        config.board_size, config.win_length, config.max_depth, config.think_time_secs
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Gomoku",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc, state)))),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("window closed with an error: {err}");
            ExitCode::FAILURE
        }
    }
}
