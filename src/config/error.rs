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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("No reasoner provider configured")]
    NoReasonerConfigured,

    #[error("Max agent attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("Max revision rounds must be at least 1")]
    InvalidMaxRevisions,

    #[error("Minimum phone digits must be between 6 and 15")]
    InvalidPhoneDigits,
}
