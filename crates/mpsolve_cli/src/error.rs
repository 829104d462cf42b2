//! Error types for the CLI.

use mpsolve_core::types::{MpFloat, NumberError, SolverError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Number construction or arithmetic failed.
    #[error("Number error: {0}")]
    Number(#[from] NumberError),

    /// Newton iteration failed.
    #[error(transparent)]
    Solver(#[from] SolverError<MpFloat>),

    /// Malformed command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Report serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
