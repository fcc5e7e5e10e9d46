//! Grid Snake - the classic snake game in the terminal
//!
//! This library provides:
//! - Core game logic: movement, collisions, food placement (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering with ratatui (render module)
//! - Session counters for the header line (metrics module)
//! - The interactive event loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
