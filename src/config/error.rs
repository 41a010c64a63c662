//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Logging initialisation failed: {0}")]
    LoggingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Extraction temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("Extraction max_tokens must be positive")]
    InvalidMaxTokens,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Minimum advance days cannot be negative, got {0}")]
    NegativeAdvanceDays(i64),

    #[error("Minimum advance days cannot exceed {max}, got {value}")]
    AdvanceDaysTooLarge { value: i64, max: i64 },

    #[error("Invalid booking base URL: {0}")]
    InvalidBookingUrl(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
