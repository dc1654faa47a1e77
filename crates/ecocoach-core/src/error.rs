//! Core error types for ecocoach-core.
//!
//! Validation failures are returned to the caller, gateway failures are
//! absorbed by the service facade, and configuration failures surface from
//! the config loader. Unknown users are never an error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ecocoach-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Coach gateway errors
    #[error("Coach gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home/config directory could not be prepared
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Required text field was empty
    #[error("'{field}' must not be empty")]
    EmptyField { field: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Failures talking to the chat-completion service.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No API key available
    #[error("Coach gateway is not configured: {0}")]
    NotConfigured(String),

    /// Transport-level failure
    #[error("Request to completion service failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Completion service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not contain a usable reply
    #[error("Malformed completion response: {0}")]
    Malformed(String),

    /// Call exceeded its deadline
    #[error("Completion request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
