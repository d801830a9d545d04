/// Errors raised at the fallible edges of the effects crate
///
/// Sample processing itself never fails; only configuration loading and
/// offline rendering surface errors.
use thiserror::Error;

/// Result type alias using `EffectsError`
pub type Result<T> = std::result::Result<T, EffectsError>;

/// Effects error types
#[derive(Error, Debug)]
pub enum EffectsError {
    /// Configuration could not be loaded or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Input audio is not signed 16-bit integer PCM
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// WAV reading/writing error
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<EffectsError> for cirrus_core::CirrusError {
    fn from(err: EffectsError) -> Self {
        match err {
            EffectsError::Config(msg) => cirrus_core::CirrusError::config(msg),
            EffectsError::Io(io) => cirrus_core::CirrusError::Io(io),
            other => cirrus_core::CirrusError::audio(other.to_string()),
        }
    }
}
