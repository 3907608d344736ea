use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
///
/// Every variant is fatal to a run. Per-candidate failures are
/// [`DeletionError`]s and never escalate.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Project root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Cleanup cancelled by user")]
    Interrupted,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A single candidate that could not be removed.
#[derive(Error, Debug)]
#[error("Failed to delete {description}: {source}")]
pub struct DeletionError {
    pub description: String,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SweepError>;
