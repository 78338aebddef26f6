//! Tests for the WAV writer module.

use super::container::AudioContainer;
use super::format::WavFormat;
use super::pcm::{compute_pcm_hash, decode_pcm16, extract_pcm_data};
use super::writer::{
    encode_header, quantize_sample, riff_data_len, samples_to_pcm16, write_wav, write_wav_to_vec,
    MAX_DATA_LEN,
};

// =========================================================================
// WavFormat tests
// =========================================================================

#[test]
fn test_wav_format_mono() {
    let format = WavFormat::mono(44100);
    assert_eq!(format.channels, 1);
    assert_eq!(format.sample_rate, 44100);
    assert_eq!(format.bits_per_sample, 16);
}

#[test]
fn test_block_align_and_byte_rate() {
    let format = WavFormat::mono(22050);
    assert_eq!(format.bytes_per_sample(), 2);
    assert_eq!(format.block_align(), 2);
    // 22050 samples/sec * 1 channel * 2 bytes/sample
    assert_eq!(format.byte_rate(), 44100);

    for &rate in &[8000, 11025, 44100, 48000, 96000] {
        assert_eq!(WavFormat::mono(rate).byte_rate(), rate * 2);
    }
}

// =========================================================================
// Quantization tests
// =========================================================================

#[test]
fn test_quantize_normal_range() {
    assert_eq!(quantize_sample(0.0), 0);
    // (0.5 * 32767).round() = 16384
    assert_eq!(quantize_sample(0.5), 16384);
    assert_eq!(quantize_sample(-0.5), -16384);
    assert_eq!(quantize_sample(1.0), 32767);
    assert_eq!(quantize_sample(-1.0), -32767);
}

#[test]
fn test_quantize_rounding() {
    // 0.0001 * 32767 = 3.2767 -> 3
    assert_eq!(quantize_sample(0.0001), 3);
    assert_eq!(quantize_sample(-0.0001), -3);
    // 0.9999 * 32767 = 32763.7233 -> 32764
    assert_eq!(quantize_sample(0.9999), 32764);
}

#[test]
fn test_quantize_clamps_overshoot() {
    for v in [1.0000001, 1.5, 10.0, f64::MAX] {
        assert_eq!(quantize_sample(v), 32767, "{}", v);
    }
    // Negative overshoot may use the full i16 range
    for v in [-1.5, -10.0, f64::MIN] {
        assert_eq!(quantize_sample(v), -32768, "{}", v);
    }
}

#[test]
fn test_samples_to_pcm16_little_endian() {
    let pcm = samples_to_pcm16(&[0.5, -0.5]);
    assert_eq!(pcm.len(), 4);
    assert_eq!(pcm[0..2], 16384i16.to_le_bytes());
    assert_eq!(pcm[2..4], (-16384i16).to_le_bytes());
}

// =========================================================================
// Header tests
// =========================================================================

#[test]
fn test_header_fields() {
    let header = encode_header(&WavFormat::mono(44100), 20);

    assert_eq!(&header[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes([header[4], header[5], header[6], header[7]]), 56);
    assert_eq!(&header[8..12], b"WAVE");
    assert_eq!(&header[12..16], b"fmt ");
    assert_eq!(u32::from_le_bytes([header[16], header[17], header[18], header[19]]), 16);
    assert_eq!(u16::from_le_bytes([header[20], header[21]]), 1);
    assert_eq!(u16::from_le_bytes([header[22], header[23]]), 1);
    assert_eq!(u32::from_le_bytes([header[24], header[25], header[26], header[27]]), 44100);
    assert_eq!(u32::from_le_bytes([header[28], header[29], header[30], header[31]]), 88200);
    assert_eq!(u16::from_le_bytes([header[32], header[33]]), 2);
    assert_eq!(u16::from_le_bytes([header[34], header[35]]), 16);
    assert_eq!(&header[36..40], b"data");
    assert_eq!(u32::from_le_bytes([header[40], header[41], header[42], header[43]]), 20);
}

#[test]
fn test_write_wav_matches_vec_writer() {
    let format = WavFormat::mono(22050);
    let pcm = samples_to_pcm16(&[0.1, 0.2, -0.3]);

    let mut streamed = Vec::new();
    write_wav(&mut streamed, &format, &pcm).unwrap();
    assert_eq!(streamed, write_wav_to_vec(&format, &pcm).unwrap());
}

#[test]
fn test_file_size_field() {
    let pcm = samples_to_pcm16(&[0.0; 100]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm).unwrap();

    let riff_size = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
    assert_eq!(riff_size, wav.len() as u32 - 8);
    assert_eq!(wav.len(), 244);
}

#[test]
fn test_riff_data_len_limit() {
    assert_eq!(riff_data_len(0).unwrap(), 0);
    assert_eq!(riff_data_len(MAX_DATA_LEN as usize).unwrap(), MAX_DATA_LEN);

    let err = riff_data_len(MAX_DATA_LEN as usize + 1).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_riff_data_len_rejects_past_u32() {
    assert!(riff_data_len(u32::MAX as usize + 1).is_err());
}

#[test]
fn test_header_size_saturates() {
    let header = encode_header(&WavFormat::mono(8000), u32::MAX);
    assert_eq!(u32::from_le_bytes([header[4], header[5], header[6], header[7]]), u32::MAX);
}

#[test]
fn test_empty_data() {
    let wav = write_wav_to_vec(&WavFormat::mono(8000), &[]).unwrap();
    assert_eq!(wav.len(), 44);
    assert_eq!(extract_pcm_data(&wav), Some(&[][..]));
}

// =========================================================================
// PCM extraction tests
// =========================================================================

#[test]
fn test_extract_pcm_data_roundtrip() {
    let pcm = samples_to_pcm16(&[0.25, -0.25, 0.75]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm).unwrap();
    assert_eq!(extract_pcm_data(&wav), Some(pcm.as_slice()));
    assert_eq!(decode_pcm16(&wav), Some(vec![8192, -8192, 24575]));
}

#[test]
fn test_extract_pcm_data_rejects_garbage() {
    assert_eq!(extract_pcm_data(b"RIFF"), None);
    assert_eq!(extract_pcm_data(&[0u8; 64]), None);
}

#[test]
fn test_extract_pcm_data_truncated_chunk() {
    let pcm = samples_to_pcm16(&[0.5; 10]);
    let mut wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm).unwrap();
    wav.truncate(50);
    assert_eq!(extract_pcm_data(&wav), None);
}

#[test]
fn test_extract_skips_unknown_chunks() {
    // RIFF/WAVE with a LIST chunk of odd size before "data"
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"LIST");
    wav.extend_from_slice(&3u32.to_le_bytes());
    wav.extend_from_slice(&[1, 2, 3, 0]); // 3 bytes + pad
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&4u32.to_le_bytes());
    wav.extend_from_slice(&[9, 8, 7, 6]);
    wav.extend_from_slice(&[0u8; 20]);

    assert_eq!(extract_pcm_data(&wav), Some(&[9u8, 8, 7, 6][..]));
}

// =========================================================================
// Container and hashing tests
// =========================================================================

#[test]
fn test_container_from_mono() {
    let container = AudioContainer::from_mono(&[0.0, 0.5, -0.5, 0.0], 8000).unwrap();
    assert_eq!(container.len(), 44 + 8);
    assert_eq!(container.num_samples(), 4);
    assert_eq!(container.sample_rate(), 8000);
    assert_eq!(container.pcm_data().len(), 8);
    assert!(!container.is_empty());
    assert!((container.duration_seconds() - 0.0005).abs() < 1e-12);
}

#[test]
fn test_container_hash_matches_extracted_pcm() {
    let container = AudioContainer::from_mono(&[0.5, -0.5, 0.3, -0.3, 0.0], 44100).unwrap();
    let hash = compute_pcm_hash(container.as_bytes()).expect("should compute hash");
    assert_eq!(hash, container.pcm_hash());
    assert_eq!(hash.len(), 64);
}

#[test]
fn test_pcm_hash_differs_for_different_samples() {
    let a = AudioContainer::from_mono(&[0.5, -0.5, 0.3], 44100).unwrap();
    let b = AudioContainer::from_mono(&[0.5, -0.5, 0.31], 44100).unwrap();
    assert_ne!(a.pcm_hash(), b.pcm_hash());
}

#[test]
fn test_container_into_bytes() {
    let container = AudioContainer::from_mono(&[0.1; 3], 8000).unwrap();
    let expected = container.as_bytes().to_vec();
    let bytes: Vec<u8> = container.into();
    assert_eq!(bytes, expected);
}
