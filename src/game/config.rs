use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use super::direction::Direction;

/// Side length of the square board
pub const BOARD_SIZE: usize = 30;

/// Starting body, head first
pub const INITIAL_SNAKE: [(i32, i32); 3] = [(8, 10), (7, 10), (6, 10)];

pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Largest board accepted; it still has to fit a terminal at two columns per cell
pub const MAX_BOARD_SIZE: usize = 100;

/// Milliseconds between two game ticks
pub const TICK_INTERVAL_MS: u64 = 300;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square game grid
    pub board_size: usize,
    /// Time between two ticks of the simulation
    pub tick_interval_ms: u64,
    /// Time between two redraws of the terminal
    pub render_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            render_interval_ms: 33,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Smallest board the initial snake fits on
    pub fn small() -> Self {
        Self::new(min_board_size())
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    ///
    /// The result is not validated, so command line overrides can still be
    /// applied; call `validate` once they are merged.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let min = min_board_size();
        if self.board_size < min {
            bail!(
                "board size {} is too small for the initial snake (minimum {})",
                self.board_size,
                min
            );
        }
        if self.board_size > MAX_BOARD_SIZE {
            bail!(
                "board size {} is too large (maximum {})",
                self.board_size,
                MAX_BOARD_SIZE
            );
        }
        if self.tick_interval_ms == 0 {
            bail!("tick interval must be greater than zero");
        }
        if self.render_interval_ms == 0 {
            bail!("render interval must be greater than zero");
        }
        Ok(())
    }
}

fn min_board_size() -> usize {
    INITIAL_SNAKE
        .iter()
        .map(|&(x, y)| x.max(y) as usize + 1)
        .max()
        .unwrap_or(1)
}
