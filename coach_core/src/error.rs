//! Error types for the coach_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for coach_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Intensity label is not one of the catalog keys
    #[error("Unknown intensity: {0}")]
    UnknownIntensity(String),

    /// Caller supplied an out-of-range request parameter
    #[error("Validation error: {0}")]
    Validation(String),

    /// State management error
    #[error("State error: {0}")]
    State(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error was caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnknownIntensity(_) | Error::Validation(_))
    }
}
