//! Enveloped sine tone synthesis.
//!
//! Renders a [`ToneSpec`] into a complete mono 16-bit WAV file. Rendering is
//! a pure function of the spec: no I/O, no shared state, and the same spec
//! always yields the same bytes, so it may be called from any number of
//! threads at once.

use std::f64::consts::TAU;
use std::path::Path;

use tunecraft_spec::{
    validate_tone_spec_with_limit, InvalidSpecError, ToneSpec, MAX_TONE_DURATION_SECONDS,
};

use crate::envelope::LinearFade;
use crate::error::AudioResult;
use crate::wav::{quantize_sample, AudioContainer, MAX_DATA_LEN};

/// Renders a tone spec into a WAV container.
///
/// The spec is validated first; an invalid spec is rejected before any
/// sample buffer is allocated.
///
/// # Example
/// ```
/// use tunecraft_backend_audio::synthesize_tone;
/// use tunecraft_spec::ToneSpec;
///
/// let wav = synthesize_tone(&ToneSpec::demo()).unwrap();
/// assert_eq!(wav.len(), 88244);
/// assert_eq!(&wav.as_bytes()[0..4], b"RIFF");
/// ```
pub fn synthesize_tone(spec: &ToneSpec) -> Result<AudioContainer, InvalidSpecError> {
    synthesize_tone_with_limit(spec, MAX_TONE_DURATION_SECONDS)
}

/// Renders a tone spec with a caller-supplied duration ceiling.
pub fn synthesize_tone_with_limit(
    spec: &ToneSpec,
    max_duration_seconds: f64,
) -> Result<AudioContainer, InvalidSpecError> {
    validate_tone_spec_with_limit(spec, max_duration_seconds)?;
    render(spec)
}

/// Renders a tone and writes it to `path`.
pub fn write_tone_file(spec: &ToneSpec, path: &Path) -> AudioResult<AudioContainer> {
    let container = synthesize_tone(spec)?;
    std::fs::write(path, container.as_bytes())?;
    Ok(container)
}

fn render(spec: &ToneSpec) -> Result<AudioContainer, InvalidSpecError> {
    let num_samples = spec.sample_count();
    let sample_rate = spec.sample_rate as f64;
    let omega = TAU * spec.frequency_hz;
    let envelope = LinearFade::new(spec.fade_seconds, spec.duration_seconds);

    let mut pcm = Vec::with_capacity(num_samples * 2);
    for i in 0..num_samples {
        let t = i as f64 / sample_rate;
        let value = spec.amplitude * (omega * t).sin() * envelope.gain(t);
        pcm.extend_from_slice(&quantize_sample(value).to_le_bytes());
    }

    // Only reachable if the duration ceiling is raised past what a RIFF
    // header can describe at this sample rate.
    AudioContainer::from_pcm16(&pcm, spec.sample_rate).map_err(|_| {
        InvalidSpecError::DurationTooLong {
            duration: spec.duration_seconds,
            max: f64::from(MAX_DATA_LEN / 2) / sample_rate,
        }
    })
}
