//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Detection {field} must be between {min} and {max}")]
    DetectionOutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("Notification min_severity must be at most 100")]
    InvalidMinSeverity,

    #[error("Notification max_pending must be positive")]
    InvalidMaxPending,

    #[error("Notification dispatch interval must be positive")]
    InvalidDispatchInterval,
}
