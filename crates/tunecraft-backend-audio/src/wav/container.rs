//! The rendered audio container.

use std::io;

use tunecraft_spec::WAV_HEADER_LEN;

use super::format::WavFormat;
use super::writer::{samples_to_pcm16, write_wav_to_vec};

/// A complete, immutable WAV file held in memory.
///
/// Produced once per synthesis call and handed to the caller; the bytes are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioContainer {
    bytes: Vec<u8>,
    pcm_hash: String,
    sample_rate: u32,
    num_samples: usize,
}

impl AudioContainer {
    /// Builds a container from mono f64 samples.
    pub fn from_mono(samples: &[f64], sample_rate: u32) -> io::Result<Self> {
        let pcm = samples_to_pcm16(samples);
        Self::from_pcm16(&pcm, sample_rate)
    }

    /// Builds a container from already-quantized little-endian PCM bytes.
    ///
    /// Fails when the payload is too large for a RIFF header.
    pub fn from_pcm16(pcm: &[u8], sample_rate: u32) -> io::Result<Self> {
        let bytes = write_wav_to_vec(&WavFormat::mono(sample_rate), pcm)?;
        Ok(Self {
            bytes,
            pcm_hash: blake3::hash(pcm).to_hex().to_string(),
            sample_rate,
            num_samples: pcm.len() / 2,
        })
    }

    /// The complete file bytes, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the container and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The PCM data region (everything after the header).
    pub fn pcm_data(&self) -> &[u8] {
        &self.bytes[WAV_HEADER_LEN..]
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the container holds no samples.
    pub fn is_empty(&self) -> bool {
        self.num_samples == 0
    }

    /// BLAKE3 hash of the PCM data only.
    pub fn pcm_hash(&self) -> &str {
        &self.pcm_hash
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}

impl AsRef<[u8]> for AudioContainer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<AudioContainer> for Vec<u8> {
    fn from(container: AudioContainer) -> Self {
        container.bytes
    }
}
