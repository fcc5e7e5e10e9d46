//! File logging for the terminal front end.
//!
//! The TUI owns the terminal, so log records go to a file instead of stderr.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Install a global logger writing to `path`, truncating any previous log.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;
    Ok(())
}
