/// Core error types for Cirrus
use thiserror::Error;

/// Result type alias using `CirrusError`
pub type Result<T> = std::result::Result<T, CirrusError>;

/// Core error type for Cirrus
#[derive(Error, Debug)]
pub enum CirrusError {
    /// Audio processing or rendering errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CirrusError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
