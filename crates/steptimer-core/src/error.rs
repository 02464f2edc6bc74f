//! Core error types for steptimer-core.
//!
//! Every failure the engine can observe is recovered at the boundary where it
//! occurs. None of these variants is fatal to a running timer.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for steptimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Step list import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Target completion time errors
    #[error("Target error: {0}")]
    Target(#[from] TargetError),

    /// Notification sink errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while validating an externally supplied step list.
///
/// Validation stops at the first failure, so at most one index is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Input is not JSON, or not a JSON array.
    #[error("Invalid step list: {0}")]
    Parse(String),

    /// Well-formed JSON whose element at `index` has the wrong shape.
    #[error("Step {} is missing required properties: {reason}", .index + 1)]
    Schema { index: usize, reason: String },
}

/// Errors raised while interpreting a target completion time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Input is not an `HH:MM` time of day.
    #[error("Invalid time of day '{0}': expected HH:MM")]
    InvalidTimeOfDay(String),

    /// The wall-clock time falls in a daylight-saving gap.
    #[error("Local time {0} does not exist")]
    NonexistentLocalTime(chrono::NaiveDateTime),
}

/// Notification sink errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The sink could not play its sound. The message itself was still shown.
    #[error("Audio unavailable: {reason}")]
    AudioUnavailable { reason: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No home directory to place the configuration in
    #[error("Could not determine the configuration directory")]
    NoDataDir,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
