//! Deterministic WAV file writer.
//!
//! This module writes canonical 44-byte-header 16-bit PCM WAV files with no
//! timestamps or optional chunks, so identical samples always produce
//! identical bytes. The BLAKE3 hash of the PCM data doubles as an entity tag.

mod container;
mod format;
mod pcm;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use container::AudioContainer;
pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, decode_pcm16, extract_pcm_data};
pub use writer::{
    encode_header, quantize_sample, samples_to_pcm16, write_wav, write_wav_to_vec, MAX_DATA_LEN,
};
