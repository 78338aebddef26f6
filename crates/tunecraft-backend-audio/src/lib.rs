//! Tunecraft Audio Backend
//!
//! Renders tone specs into canonical 16-bit PCM WAV files.
//!
//! # Determinism
//!
//! Synthesis is a pure function of the spec. Given the same spec, the output
//! is byte-identical across runs and across threads. The WAV writer emits no
//! timestamps or optional chunks.
//!
//! # Example
//!
//! ```
//! use tunecraft_backend_audio::synthesize_tone;
//! use tunecraft_spec::ToneSpec;
//!
//! let wav = synthesize_tone(&ToneSpec::demo())?;
//! assert_eq!(wav.len(), 44 + 2 * 44100);
//! println!("PCM hash: {}", wav.pcm_hash());
//! # Ok::<(), tunecraft_spec::InvalidSpecError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`synthesize_tone()`] - Main entry point for tone rendering
//! - [`envelope`] - Linear fade envelope
//! - [`wav`] - Deterministic WAV file writer

pub mod envelope;
pub mod error;
pub mod tone;
pub mod wav;

// Re-export main types at crate root
pub use envelope::LinearFade;
pub use error::{AudioError, AudioResult};
pub use tone::{synthesize_tone, synthesize_tone_with_limit, write_tone_file};
pub use wav::{AudioContainer, WavFormat};
