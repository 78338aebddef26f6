//! Tone spec validation logic.

use crate::error::InvalidSpecError;
use crate::spec::{ToneSpec, MAX_SAMPLE_RATE, MAX_TONE_DURATION_SECONDS};

/// Validates a tone spec against the built-in duration ceiling.
///
/// Fields are checked in declaration order and the first violation is
/// returned.
///
/// # Example
/// ```
/// use tunecraft_spec::{ToneSpec, InvalidSpecError};
/// use tunecraft_spec::validation::validate_tone_spec;
///
/// assert!(validate_tone_spec(&ToneSpec::demo()).is_ok());
///
/// let overlapping = ToneSpec::new(44100, 1.0, 440.0, 0.3, 0.6);
/// assert!(matches!(
///     validate_tone_spec(&overlapping),
///     Err(InvalidSpecError::FadeOverlap { .. })
/// ));
/// ```
pub fn validate_tone_spec(spec: &ToneSpec) -> Result<(), InvalidSpecError> {
    validate_tone_spec_with_limit(spec, MAX_TONE_DURATION_SECONDS)
}

/// Validates a tone spec with a caller-supplied duration ceiling.
///
/// The effective ceiling is the smaller of `max_duration_seconds` and
/// [`MAX_TONE_DURATION_SECONDS`].
pub fn validate_tone_spec_with_limit(
    spec: &ToneSpec,
    max_duration_seconds: f64,
) -> Result<(), InvalidSpecError> {
    if spec.sample_rate == 0 || spec.sample_rate > MAX_SAMPLE_RATE {
        return Err(InvalidSpecError::SampleRate {
            rate: spec.sample_rate,
            max: MAX_SAMPLE_RATE,
        });
    }

    let duration = spec.duration_seconds;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(InvalidSpecError::Duration { duration });
    }

    let max = max_duration_seconds.min(MAX_TONE_DURATION_SECONDS);
    if duration > max {
        return Err(InvalidSpecError::DurationTooLong { duration, max });
    }

    let frequency = spec.frequency_hz;
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(InvalidSpecError::Frequency { frequency });
    }

    let amplitude = spec.amplitude;
    if !(0.0..=1.0).contains(&amplitude) {
        // NaN fails `contains` as well
        return Err(InvalidSpecError::Amplitude { amplitude });
    }

    let fade = spec.fade_seconds;
    if !fade.is_finite() || fade < 0.0 {
        return Err(InvalidSpecError::Fade { fade });
    }
    if 2.0 * fade > duration {
        return Err(InvalidSpecError::FadeOverlap { fade, duration });
    }

    Ok(())
}
