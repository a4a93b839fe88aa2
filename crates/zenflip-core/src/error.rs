//! Core error types for zenflip-core.
//!
//! Nothing in the time-keeping loop is fatal. These errors surface from the
//! settings layer (load, save, field edits) and are recovered by callers:
//! the store falls back to defaults and the CLI reports them to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for zenflip-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON conversion errors (dot-path field access)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Value could not be converted to the field's type
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a settings field
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Failed to parse settings content
    #[error("Failed to parse settings: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Numeric input that cannot be clamped into range (NaN)
    #[error("Value for '{field}' is not a number")]
    NotANumber { field: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
