//! Error types for the colorizing pipeline

use std::io;
use thiserror::Error;

/// Pipeline error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error on the output or error stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A palette needs at least one color
    #[error("Palette must contain at least one color")]
    EmptyPalette,
}

/// A malformed option value.
///
/// These are reported and the offending option is ignored; they never stop a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--addsep argument requires separators after =")]
    MissingSeparators,

    #[error("--{0} argument requires a value after =")]
    MissingValue(&'static str),

    #[error("max {max} digits for --wordlen=, got '{value}'")]
    WordLimitTooLong { value: String, max: usize },

    #[error("argument for --wordlen= must be positive, got '{0}'")]
    WordLimitNotPositive(String),

    #[error("invalid color '{0}', expected RRGGBB hex")]
    InvalidColor(String),

    #[error("--buffer-size must be at least {min} bytes, got '{value}'")]
    BufferTooSmall { value: String, min: usize },

    #[error("--buffer-size must be at most {max} bytes, got '{value}'")]
    BufferTooLarge { value: String, max: usize },
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
