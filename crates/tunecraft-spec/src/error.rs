//! Error types for tone specs and generation requests.

use thiserror::Error;

/// A tone spec field violates its constraint.
///
/// Raised synchronously by validation before any sample buffer is allocated.
/// The error is deterministic: the same spec always yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidSpecError {
    /// Sample rate is zero or above the supported ceiling.
    #[error("invalid sample rate: {rate} Hz (expected 1..={max})")]
    SampleRate {
        /// The rejected sample rate.
        rate: u32,
        /// Largest accepted sample rate.
        max: u32,
    },

    /// Duration is not a positive finite number.
    #[error("invalid duration: {duration} seconds (must be > 0)")]
    Duration {
        /// The rejected duration.
        duration: f64,
    },

    /// Duration exceeds the allocation ceiling.
    #[error("duration {duration} seconds exceeds the maximum of {max} seconds")]
    DurationTooLong {
        /// The rejected duration.
        duration: f64,
        /// The ceiling that was applied.
        max: f64,
    },

    /// Frequency is not a positive finite number.
    #[error("invalid frequency: {frequency} Hz (must be > 0)")]
    Frequency {
        /// The rejected frequency.
        frequency: f64,
    },

    /// Amplitude is outside `[0, 1]`.
    #[error("invalid amplitude: {amplitude} (must be within [0, 1])")]
    Amplitude {
        /// The rejected amplitude.
        amplitude: f64,
    },

    /// Fade length is negative or not finite.
    #[error("invalid fade: {fade} seconds (must be >= 0)")]
    Fade {
        /// The rejected fade length.
        fade: f64,
    },

    /// Fade-in and fade-out windows together exceed the duration.
    #[error("fade of {fade} seconds overlaps itself in a {duration} second tone (2 * fade > duration)")]
    FadeOverlap {
        /// The fade length.
        fade: f64,
        /// The tone duration.
        duration: f64,
    },
}

impl InvalidSpecError {
    /// Name of the offending field, as it appears in serialized specs.
    pub fn field(&self) -> &'static str {
        match self {
            InvalidSpecError::SampleRate { .. } => "sample_rate",
            InvalidSpecError::Duration { .. } | InvalidSpecError::DurationTooLong { .. } => {
                "duration_seconds"
            }
            InvalidSpecError::Frequency { .. } => "frequency_hz",
            InvalidSpecError::Amplitude { .. } => "amplitude",
            InvalidSpecError::Fade { .. } | InvalidSpecError::FadeOverlap { .. } => "fade_seconds",
        }
    }
}

impl BackendError for InvalidSpecError {
    fn code(&self) -> &'static str {
        match self {
            InvalidSpecError::SampleRate { .. } => "TONE_001",
            InvalidSpecError::Duration { .. } => "TONE_002",
            InvalidSpecError::DurationTooLong { .. } => "TONE_003",
            InvalidSpecError::Frequency { .. } => "TONE_004",
            InvalidSpecError::Amplitude { .. } => "TONE_005",
            InvalidSpecError::Fade { .. } => "TONE_006",
            InvalidSpecError::FadeOverlap { .. } => "TONE_007",
        }
    }

    fn category(&self) -> &'static str {
        "tone"
    }
}

/// A generation request was rejected before reaching a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Prompt is empty after trimming.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Prompt is longer than the accepted limit.
    #[error("prompt is {len} characters long (maximum {max})")]
    PromptTooLong {
        /// Prompt length in characters.
        len: usize,
        /// Accepted maximum.
        max: usize,
    },

    /// Requested track duration is outside the accepted range.
    #[error("duration must be between 1 and {max} seconds, got {duration}")]
    Duration {
        /// Requested duration.
        duration: u32,
        /// Accepted maximum.
        max: u32,
    },

    /// Genre id is not in the catalog.
    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    /// Mood id is not in the catalog.
    #[error("unknown mood: {0}")]
    UnknownMood(String),

    /// Template id is not in the catalog.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// Collaborator email is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

impl BackendError for RequestError {
    fn code(&self) -> &'static str {
        match self {
            RequestError::EmptyPrompt => "REQ_001",
            RequestError::PromptTooLong { .. } => "REQ_002",
            RequestError::Duration { .. } => "REQ_003",
            RequestError::UnknownGenre(_) => "REQ_004",
            RequestError::UnknownMood(_) => "REQ_005",
            RequestError::UnknownTemplate(_) => "REQ_006",
            RequestError::InvalidEmail(_) => "REQ_007",
        }
    }

    fn category(&self) -> &'static str {
        "request"
    }
}

/// Top-level error type for spec operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Tone spec validation failed.
    #[error(transparent)]
    InvalidSpec(#[from] InvalidSpecError),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Common trait for errors that cross a crate or process boundary.
///
/// Each error type implements this trait to provide:
/// - Consistent error codes for reporting
/// - Human-readable messages for users
/// - A category for grouping related errors
///
/// # Example
///
/// ```
/// use tunecraft_spec::error::BackendError;
/// use tunecraft_spec::InvalidSpecError;
///
/// let err = InvalidSpecError::Amplitude { amplitude: 1.5 };
/// assert_eq!(err.code(), "TONE_005");
/// assert_eq!(err.category(), "tone");
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "TONE_001" or "PROVIDER_002". These codes
    /// are stable and can be used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
