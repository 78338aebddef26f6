//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use tunecraft_spec::WAV_HEADER_LEN;

use super::format::WavFormat;

/// Encodes the 44-byte RIFF/WAVE header for `data_len` bytes of PCM.
///
/// # Arguments
/// * `format` - WAV format parameters
/// * `data_len` - Length of the sample data region in bytes, at most [`MAX_DATA_LEN`]
pub fn encode_header(format: &WavFormat, data_len: u32) -> [u8; WAV_HEADER_LEN] {
    let mut header = [0u8; WAV_HEADER_LEN];
    // Total file size minus the 8 bytes of the RIFF chunk header
    let riff_size = data_len.saturating_add(36);

    // RIFF header
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // Chunk size (16 for PCM)
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // Audio format (1 = PCM)
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());

    header
}

/// Largest PCM payload a RIFF header can describe: the 32-bit chunk size
/// also counts the 36 header bytes after it.
pub const MAX_DATA_LEN: u32 = u32::MAX - 36;

/// Converts a PCM byte length to the header's data length field.
pub(crate) fn riff_data_len(len: usize) -> io::Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&n| n <= MAX_DATA_LEN)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("PCM data of {} bytes exceeds the 4 GiB RIFF limit", len),
            )
        })
}

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_len = riff_data_len(pcm_data.len())?;
    writer.write_all(&encode_header(format, data_len))?;
    writer.write_all(pcm_data)?;
    Ok(())
}

/// Writes a WAV file to a byte vector.
///
/// Fails with `InvalidInput` when the payload does not fit a RIFF header.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let data_len = riff_data_len(pcm_data.len())?;
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    buffer.extend_from_slice(&encode_header(format, data_len));
    buffer.extend_from_slice(pcm_data);
    Ok(buffer)
}

/// Quantizes one sample to signed 16-bit.
///
/// The value is scaled by 32767, rounded, then clamped to the full i16 range
/// so floating-point overshoot can never wrap.
#[inline]
pub fn quantize_sample(sample: f64) -> i16 {
    (sample * 32767.0)
        .round()
        .clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Converts f64 samples to 16-bit little-endian PCM bytes.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&quantize_sample(sample).to_le_bytes());
    }
    pcm
}
