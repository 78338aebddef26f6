//! JSON output types for machine-readable CLI output.
//!
//! The `--json` flag on `tone` and `catalog` prints one of these structures
//! instead of colored text so scripts can parse the result.

use serde::{Deserialize, Serialize};
use tunecraft_spec::{BackendError, Catalog, InvalidSpecError};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Tone validation failures pass their own `TONE_XXX` codes through.
pub mod error_codes {
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_001";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "TONE_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// File the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            file: None,
        }
    }

    /// Sets the field this error refers to.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Converts a tone validation error to JSON.
pub fn invalid_spec_to_json(err: &InvalidSpecError) -> JsonError {
    JsonError::new(err.code(), err.message()).with_field(err.field())
}

/// JSON output for the `tone` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneOutput {
    /// Whether the tone was written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Details of the written file (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ToneResult>,
}

/// Details of a written tone file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToneResult {
    /// Output path
    pub path: String,
    /// File size in bytes, header included
    pub bytes: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of samples
    pub num_samples: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
}

impl ToneOutput {
    /// Creates a successful tone output.
    pub fn success(result: ToneResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed tone output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// JSON output for the `catalog` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOutput {
    /// Whether the catalog was loaded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// The catalog (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Catalog>,
}

impl CatalogOutput {
    /// Creates a successful catalog output.
    pub fn success(catalog: Catalog) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(catalog),
        }
    }

    /// Creates a failed catalog output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}
