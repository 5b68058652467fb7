//! Core error types for gatherly-core.
//!
//! This module defines the error hierarchy using thiserror. Every error in
//! this library is deterministic and input-derived; the engines perform no
//! I/O, so nothing here represents a transient failure worth retrying.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for gatherly-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
///
/// Note that an unknown timezone identifier is deliberately *not* an error:
/// zone resolution degrades to UTC instead (see [`crate::interval::resolve_timezone`]).
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A meeting suggestion was requested for a group without members
    #[error("No members provided for meeting suggestion")]
    NoMembers,

    /// Unparseable timestamp string
    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
