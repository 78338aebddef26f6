//! Request and response types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tunecraft_spec::{
    BackendError, CollaboratorRole, InvalidSpecError, RequestError, SpecError, ToneSpec,
};

use crate::provider::ProviderError;
use crate::services::LibraryError;

/// Error codes produced by the HTTP layer itself.
pub mod error_codes {
    /// Query string could not be parsed
    pub const BAD_QUERY: &str = "HTTP_001";
    /// Request body is not the expected JSON
    pub const BAD_BODY: &str = "HTTP_002";
    /// No route matches the path
    pub const NOT_FOUND: &str = "HTTP_003";
    /// Daily generation quota is used up
    pub const QUOTA_EXCEEDED: &str = "HTTP_004";
    /// Unexpected server failure
    pub const INTERNAL: &str = "HTTP_005";
}

/// Optional overrides for the demo tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ToneQuery {
    /// Frequency in Hz.
    pub frequency: Option<f64>,
    /// Duration in seconds.
    pub duration: Option<f64>,
    /// Sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Peak amplitude in `[0, 1]`.
    pub amplitude: Option<f64>,
    /// Fade length in seconds.
    pub fade: Option<f64>,
}

impl ToneQuery {
    /// Applies the overrides to the demo tone.
    pub fn to_spec(&self) -> ToneSpec {
        let demo = ToneSpec::demo();
        ToneSpec::new(
            self.sample_rate.unwrap_or(demo.sample_rate),
            self.duration.unwrap_or(demo.duration_seconds),
            self.frequency.unwrap_or(demo.frequency_hz),
            self.amplitude.unwrap_or(demo.amplitude),
            self.fade.unwrap_or(demo.fade_seconds),
        )
    }
}

/// Body of `POST /api/tracks/:id/collaborators`.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteBody {
    /// Invitee address.
    pub email: String,
    /// Granted role (default viewer).
    #[serde(default)]
    pub role: CollaboratorRole,
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Stable error code.
    pub code: String,
}

/// An error that renders as a status code and an [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// Response body.
    pub body: ErrorBody,
}

impl ApiError {
    /// Creates an error response.
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                code: code.into(),
            },
        }
    }

    /// 404 for unknown routes.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, "not found")
    }

    /// 500 for failures the client cannot fix.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL,
            message,
        )
    }

    fn from_backend(status: StatusCode, err: &dyn BackendError) -> Self {
        Self::new(status, err.code(), err.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<InvalidSpecError> for ApiError {
    fn from(err: InvalidSpecError) -> Self {
        Self::from_backend(StatusCode::BAD_REQUEST, &err)
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        Self::from_backend(StatusCode::BAD_REQUEST, &err)
    }
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        let status = match err {
            LibraryError::NotFound(_) => StatusCode::NOT_FOUND,
            LibraryError::Duplicate(_) | LibraryError::AlreadyInvited { .. } => {
                StatusCode::CONFLICT
            }
            LibraryError::Request(_) => StatusCode::BAD_REQUEST,
            // One code for the quota, whichever check caught it
            LibraryError::QuotaExceeded { .. } => {
                return Self::new(
                    StatusCode::TOO_MANY_REQUESTS,
                    error_codes::QUOTA_EXCEEDED,
                    err.to_string(),
                );
            }
        };
        Self::from_backend(status, &err)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = match err {
            ProviderError::UnknownJob(_) => StatusCode::NOT_FOUND,
            ProviderError::MissingCredentials { .. } | ProviderError::Offline { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        Self::from_backend(status, &err)
    }
}

impl From<SpecError> for ApiError {
    fn from(err: SpecError) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_tone_query_defaults_to_demo() {
        assert_eq!(ToneQuery::default().to_spec(), ToneSpec::demo());
        let spec = ToneQuery {
            frequency: Some(880.0),
            sample_rate: Some(44100),
            ..ToneQuery::default()
        }
        .to_spec();
        assert_eq!(spec.frequency_hz, 880.0);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.duration_seconds, 2.0);
    }

    #[test]
    fn test_error_status_mapping() {
        let err = ApiError::from(InvalidSpecError::Amplitude { amplitude: 1.5 });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "TONE_005");

        let err = ApiError::from(LibraryError::NotFound("x".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ApiError::from(LibraryError::from(RequestError::InvalidEmail("x".into())));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "REQ_007");

        let err = ApiError::from(LibraryError::QuotaExceeded {
            limit: 3,
            resets_at: Utc.with_ymd_and_hms(2026, 5, 6, 0, 0, 0).unwrap(),
        });
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.body.code, "HTTP_004");
        assert_eq!(
            err.body.error,
            "daily quota of 3 generations reached, resets at 2026-05-06T00:00:00+00:00"
        );

        let err = ApiError::from(ProviderError::Offline {
            provider: "suno",
            endpoint: "https://api.suno.ai/v1/generate".to_string(),
        });
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_invite_body_role_default() {
        let body: InviteBody = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(body.role, CollaboratorRole::Viewer);
        let body: InviteBody =
            serde_json::from_str(r#"{"email":"a@b.co","role":"editor"}"#).unwrap();
        assert_eq!(body.role, CollaboratorRole::Editor);
    }
}
