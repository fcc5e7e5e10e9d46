//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through `GameEngine::tick`, `set_direction`
//! and `restart`, and reads `GameState` back for drawing.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{
    BOARD_SIZE, GameConfig, INITIAL_DIRECTION, INITIAL_SNAKE, MAX_BOARD_SIZE, TICK_INTERVAL_MS,
};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use state::{CellKind, CollisionType, GameState, Position, Snake};
