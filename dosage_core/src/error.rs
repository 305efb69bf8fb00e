//! Error types for the dosage_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dosage_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required form field is missing, unparseable, or not a positive number
    #[error("Incomplete input: {field} is missing or invalid")]
    IncompleteInput { field: &'static str },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for the "nothing to calculate" case that the form swallows
    pub fn is_incomplete_input(&self) -> bool {
        matches!(self, Error::IncompleteInput { .. })
    }
}
