//! Error types for audio backend.

use thiserror::Error;
use tunecraft_spec::{BackendError, InvalidSpecError};

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while rendering or writing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The tone spec was rejected before rendering.
    #[error(transparent)]
    InvalidSpec(#[from] InvalidSpecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSpec(e) => e.code(),
            AudioError::Io(_) => "AUDIO_001",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AudioError::InvalidSpec(e) => e.category(),
            AudioError::Io(_) => "audio",
        }
    }
}
