//! Core error types for multitimer-core.
//!
//! The engine itself treats unknown commands and unknown timer ids as
//! silent no-ops; these types cover the surrounding concerns (config,
//! filesystem, worker channel).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for multitimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine worker is gone: its command channel has been closed.
    #[error("Engine worker unavailable: command channel closed")]
    ChannelClosed,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse configuration at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-separated configuration key
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
