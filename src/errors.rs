use std::io;

use bakery_config::ConfigError;
use bakery_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Top-level error surfaced by the shell entry point.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
