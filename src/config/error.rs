//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::constants::ThresholdError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold value could not be parsed as a number.
    #[error("failed to parse {name} '{value}': {source}")]
    ThresholdParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Threshold is outside `(0, 1]`.
    #[error("invalid {name}: {source}")]
    InvalidThreshold {
        name: &'static str,
        #[source]
        source: ThresholdError,
    },

    /// Count value could not be parsed as a non-negative integer.
    #[error("failed to parse {name} '{value}': {source}")]
    CountParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Worker count of zero.
    #[error("invalid worker count '{value}': must be at least 1")]
    InvalidWorkers { value: usize },

    /// Boolean flag not in `true/false/1/0/yes/no/on/off`.
    #[error("invalid boolean for {name}: '{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// Log format other than `text` or `json`.
    #[error("invalid log format '{value}': expected 'text' or 'json'")]
    InvalidLogFormat { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
