//! Tone spec type.

use serde::{Deserialize, Serialize};

use crate::error::InvalidSpecError;
use crate::validation::validate_tone_spec;

/// Size of the canonical RIFF/WAVE PCM header in bytes.
pub const WAV_HEADER_LEN: usize = 44;

/// Bytes per emitted sample (mono, 16-bit).
pub const BYTES_PER_SAMPLE: usize = 2;

/// Hard ceiling on tone duration, in seconds.
///
/// Sample count grows linearly with duration, so every caller is bounded by
/// this value even if it applies no tighter limit of its own.
pub const MAX_TONE_DURATION_SECONDS: f64 = 600.0;

/// Largest accepted sample rate in Hz.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Parameters of a single enveloped sine tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToneSpec {
    /// Sample rate in Hz (typically 22050 or 44100).
    pub sample_rate: u32,
    /// Tone length in seconds.
    pub duration_seconds: f64,
    /// Sine frequency in Hz.
    pub frequency_hz: f64,
    /// Peak linear amplitude before 16-bit quantization, in `[0, 1]`.
    pub amplitude: f64,
    /// Length of each linear fade window (in and out), in seconds.
    #[serde(default)]
    pub fade_seconds: f64,
}

impl ToneSpec {
    /// Creates a new tone spec without validating it.
    pub fn new(
        sample_rate: u32,
        duration_seconds: f64,
        frequency_hz: f64,
        amplitude: f64,
        fade_seconds: f64,
    ) -> Self {
        Self {
            sample_rate,
            duration_seconds,
            frequency_hz,
            amplitude,
            fade_seconds,
        }
    }

    /// The demo tone served by `/api/demo-audio`: A4 for two seconds at
    /// 22.05 kHz with a 100 ms fade on each end.
    pub fn demo() -> Self {
        Self::new(22050, 2.0, 440.0, 0.3, 0.1)
    }

    /// Parses a tone spec from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the spec to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the duration.
    pub fn with_duration(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    /// Sets the frequency.
    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    /// Sets the amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the fade length.
    pub fn with_fade(mut self, fade_seconds: f64) -> Self {
        self.fade_seconds = fade_seconds;
        self
    }

    /// Validates every field; see [`validate_tone_spec`].
    pub fn validate(&self) -> Result<(), InvalidSpecError> {
        validate_tone_spec(self)
    }

    /// Number of samples the tone renders to: `round(sample_rate * duration)`.
    pub fn sample_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration_seconds).round() as usize
    }

    /// Length of the PCM data region in bytes.
    pub fn data_len(&self) -> usize {
        self.sample_count() * BYTES_PER_SAMPLE
    }

    /// Length of the complete container in bytes.
    pub fn container_len(&self) -> usize {
        WAV_HEADER_LEN + self.data_len()
    }
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_demo_sizes() {
        let spec = ToneSpec::demo();
        assert_eq!(spec.sample_count(), 44100);
        assert_eq!(spec.data_len(), 88200);
        assert_eq!(spec.container_len(), 88244);
    }

    #[test]
    fn test_sample_count_rounds() {
        // 44100 * 0.00001 = 0.441 -> 0; 44100 * 0.00002 = 0.882 -> 1
        assert_eq!(ToneSpec::demo().with_sample_rate(44100).with_duration(0.00001).sample_count(), 0);
        assert_eq!(ToneSpec::demo().with_sample_rate(44100).with_duration(0.00002).sample_count(), 1);
    }

    #[test]
    fn test_json_roundtrip_keeps_fields() {
        let spec = ToneSpec::new(44100, 1.5, 261.63, 0.5, 0.05);
        let json = spec.to_json().unwrap();
        let parsed = ToneSpec::from_json(&json).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_fade_defaults_to_zero() {
        let spec = ToneSpec::from_json(
            r#"{"sample_rate":8000,"duration_seconds":1.0,"frequency_hz":100.0,"amplitude":0.5}"#,
        )
        .unwrap();
        assert_eq!(spec.fade_seconds, 0.0);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = ToneSpec::from_json(
            r#"{"sample_rate":8000,"duration_seconds":1.0,"frequency_hz":100.0,"amplitude":0.5,"channels":2}"#,
        );
        assert!(result.is_err());
    }
}
