//! Tunecraft Canonical Types
//!
//! This crate provides the types shared by the Tunecraft backends and
//! service: the tone spec rendered by the audio backend, the catalog and
//! track records served over HTTP, their validation, and hashing.
//!
//! # Example
//!
//! ```
//! use tunecraft_spec::ToneSpec;
//!
//! let spec = ToneSpec::demo();
//! assert!(spec.validate().is_ok());
//! assert_eq!(spec.container_len(), 88244);
//! ```
//!
//! # Modules
//!
//! - [`spec`]: Tone spec type and size helpers
//! - [`validation`]: Tone spec validation
//! - [`catalog`]: Genres, moods and templates
//! - [`track`]: Generation requests, tracks, collaborators and quotas
//! - [`error`]: Error types and the `BackendError` trait
//! - [`hash`]: Canonical hashing and seed derivation

pub mod catalog;
pub mod error;
pub mod hash;
pub mod spec;
pub mod track;
pub mod validation;

// Re-export commonly used types at the crate root
pub use catalog::{Catalog, Genre, Mood, Template};
pub use error::{BackendError, InvalidSpecError, RequestError, SpecError};
pub use spec::{
    ToneSpec, BYTES_PER_SAMPLE, MAX_SAMPLE_RATE, MAX_TONE_DURATION_SECONDS, WAV_HEADER_LEN,
};
pub use track::{
    validate_email, Collaborator, CollaboratorRole, GenerationJob, GenerationRequest,
    GenerationStatus, InviteStatus, Plan, Profile, Quota, Track, TrackStatus,
    DEFAULT_TRACK_SECONDS, MAX_PROMPT_CHARS,
};
pub use validation::{validate_tone_spec, validate_tone_spec_with_limit};
