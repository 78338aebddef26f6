//! Tests for the HTTP handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tunecraft_spec::{Catalog, CollaboratorRole, GenerationJob, GenerationRequest, GenerationStatus};

use super::handlers;
use super::state::{AppState, SharedState};
use super::types::{ErrorBody, InviteBody, ToneQuery};
use crate::config::ServerConfig;
use crate::provider::{MockProvider, MusicProvider, ProviderError};
use crate::services::Library;

fn state_with(config: ServerConfig) -> SharedState {
    AppState::new(
        config,
        Catalog::builtin(),
        Box::new(MockProvider::new()),
        Library::new(),
    )
    .shared()
}

/// Mock provider that takes a while to compose, so requests overlap.
struct SlowProvider(MockProvider);

impl MusicProvider for SlowProvider {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<GenerationJob, ProviderError> {
        std::thread::sleep(Duration::from_millis(50));
        self.0.generate(request, seed)
    }

    fn poll_status(&self, job_id: &str) -> Result<GenerationStatus, ProviderError> {
        self.0.poll_status(job_id)
    }

    fn forget_track(&self, track_id: &str) {
        self.0.forget_track(track_id)
    }
}

fn state() -> SharedState {
    state_with(ServerConfig::default())
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn error_body(err: super::ApiError) -> (StatusCode, ErrorBody) {
    let response = err.into_response();
    let status = response.status();
    let body = serde_json::from_slice(&body_bytes(response).await).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_demo_audio_default() {
    let response = handlers::demo_audio(
        State(state()),
        HeaderMap::new(),
        Ok(Query(ToneQuery::default())),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "audio/wav");
    assert_eq!(headers[header::CONTENT_LENGTH], "88244");
    assert_eq!(headers[header::ACCEPT_RANGES], "bytes");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=3600");
    assert!(headers.contains_key(header::ETAG));

    let body = body_bytes(response).await;
    assert_eq!(body.len(), 88244);
    assert_eq!(&body[0..4], b"RIFF");
}

#[tokio::test]
async fn test_demo_audio_not_modified() {
    let first = handlers::demo_audio(
        State(state()),
        HeaderMap::new(),
        Ok(Query(ToneQuery::default())),
    )
    .await
    .unwrap();
    let etag = first.headers()[header::ETAG].clone();

    let mut headers = HeaderMap::new();
    headers.insert(header::IF_NONE_MATCH, etag.clone());
    let second = handlers::demo_audio(State(state()), headers, Ok(Query(ToneQuery::default())))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(second.headers()[header::ETAG], etag);
    assert!(body_bytes(second).await.is_empty());
}

#[tokio::test]
async fn test_demo_audio_rejects_invalid_tone() {
    let query = ToneQuery {
        amplitude: Some(1.5),
        ..ToneQuery::default()
    };
    let err = handlers::demo_audio(State(state()), HeaderMap::new(), Ok(Query(query)))
        .await
        .unwrap_err();
    let (status, body) = error_body(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "TONE_005");
}

#[tokio::test]
async fn test_demo_audio_applies_configured_ceiling() {
    let config = ServerConfig {
        max_tone_seconds: 1.0,
        ..ServerConfig::default()
    };
    let err = handlers::demo_audio(State(state_with(config)), HeaderMap::new(), Ok(Query(ToneQuery::default())))
        .await
        .unwrap_err();
    let (status, body) = error_body(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "TONE_003");
}

#[test]
fn test_etag_matches() {
    let mut headers = HeaderMap::new();
    assert!(!handlers::etag_matches(&headers, "\"abc\""));

    headers.insert(
        header::IF_NONE_MATCH,
        HeaderValue::from_static("\"xyz\", W/\"abc\""),
    );
    assert!(handlers::etag_matches(&headers, "\"abc\""));
    assert!(!handlers::etag_matches(&headers, "\"def\""));

    headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("*"));
    assert!(handlers::etag_matches(&headers, "\"def\""));
}

#[tokio::test]
async fn test_generate_then_fetch_and_delete() {
    let state = state();
    let request = GenerationRequest::new("neon city at night").with_template("night-drive");

    let (status, Json(job)) = handlers::generate(State(state.clone()), Ok(Json(request)))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let track = job.track.unwrap();
    assert_eq!(track.genre.as_deref(), Some("electronic"));
    assert_eq!(track.duration_seconds, 150);

    let Json(status) = handlers::generation_status(State(state.clone()), Path(job.job_id))
        .await
        .unwrap();
    assert_eq!(status.track_id.as_deref(), Some(track.id.as_str()));

    let Json(fetched) = handlers::get_track(State(state.clone()), Path(track.id.clone()))
        .await
        .unwrap();
    assert_eq!(fetched, track);

    let Json(listed) = handlers::list_tracks(State(state.clone())).await;
    assert_eq!(listed.len(), 1);

    let status = handlers::delete_track(State(state.clone()), Path(track.id.clone()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = handlers::get_track(State(state), Path(track.id))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_validation_errors() {
    let state = state();

    let err = handlers::generate(State(state.clone()), Ok(Json(GenerationRequest::new(" "))))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.body.code, "REQ_001");

    let request = GenerationRequest::new("x").with_genre("polka");
    let err = handlers::generate(State(state.clone()), Ok(Json(request)))
        .await
        .unwrap_err();
    assert_eq!(err.body.code, "REQ_004");

    let request = GenerationRequest::new("x").with_duration(301);
    let err = handlers::generate(State(state), Ok(Json(request)))
        .await
        .unwrap_err();
    assert_eq!(err.body.code, "REQ_003");
}

#[tokio::test]
async fn test_generate_enforces_daily_quota() {
    let config = ServerConfig {
        daily_quota: 2,
        ..ServerConfig::default()
    };
    let state = state_with(config);

    for _ in 0..2 {
        handlers::generate(State(state.clone()), Ok(Json(GenerationRequest::new("loop"))))
            .await
            .unwrap();
    }
    let err = handlers::generate(State(state.clone()), Ok(Json(GenerationRequest::new("loop"))))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);

    let Json(quota) = handlers::quota(State(state.clone())).await;
    assert_eq!(quota.used, 2);
    assert_eq!(quota.remaining, 0);

    let Json(profile) = handlers::profile(State(state)).await;
    assert_eq!(profile.quota.limit, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_daily_quota_holds_under_concurrent_requests() {
    let config = ServerConfig {
        daily_quota: 1,
        ..ServerConfig::default()
    };
    let state = AppState::new(
        config,
        Catalog::builtin(),
        Box::new(SlowProvider(MockProvider::new())),
        Library::new(),
    )
    .shared();

    let requests: Vec<_> = (0..8)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                let request = GenerationRequest::new(format!("overlap {}", i));
                handlers::generate(State(state), Ok(Json(request))).await
            })
        })
        .collect();

    let mut accepted = 0;
    let mut rejected = 0;
    for request in requests {
        match request.await.unwrap() {
            Ok((status, _)) => {
                assert_eq!(status, StatusCode::CREATED);
                accepted += 1;
            }
            Err(err) => {
                assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(err.body.code, "HTTP_004");
                rejected += 1;
            }
        }
    }

    assert_eq!((accepted, rejected), (1, 7));
    assert_eq!(state.library.len(), 1);
    let Json(quota) = handlers::quota(State(state)).await;
    assert_eq!(quota.used, 1);
}

#[tokio::test]
async fn test_deleted_track_job_polls_as_unknown() {
    let state = state();
    let (_, Json(job)) = handlers::generate(State(state.clone()), Ok(Json(GenerationRequest::new("brief"))))
        .await
        .unwrap();
    let track = job.track.unwrap();

    handlers::delete_track(State(state.clone()), Path(track.id))
        .await
        .unwrap();

    let err = handlers::generation_status(State(state), Path(job.job_id))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.body.code, "PROVIDER_003");
}

#[tokio::test]
async fn test_invite_collaborator() {
    let state = state();
    let (_, Json(job)) = handlers::generate(State(state.clone()), Ok(Json(GenerationRequest::new("duet"))))
        .await
        .unwrap();
    let track_id = job.track.unwrap().id;

    let body = InviteBody {
        email: "ana@example.com".to_string(),
        role: CollaboratorRole::Editor,
    };
    let (status, Json(invite)) =
        handlers::invite_collaborator(State(state.clone()), Path(track_id.clone()), Ok(Json(body.clone())))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invite.role, CollaboratorRole::Editor);

    let err = handlers::invite_collaborator(State(state.clone()), Path(track_id.clone()), Ok(Json(body)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);

    let bad = InviteBody {
        email: "nope".to_string(),
        role: CollaboratorRole::Viewer,
    };
    let err = handlers::invite_collaborator(State(state.clone()), Path(track_id), Ok(Json(bad)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);

    let body = InviteBody {
        email: "ana@example.com".to_string(),
        role: CollaboratorRole::Viewer,
    };
    let err = handlers::invite_collaborator(State(state), Path("trk-missing".to_string()), Ok(Json(body)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_handlers() {
    let state = state();
    let Json(genres) = handlers::list_genres(State(state.clone())).await;
    assert_eq!(genres.len(), 9);
    let Json(moods) = handlers::list_moods(State(state.clone())).await;
    assert_eq!(moods.len(), 8);
    let Json(templates) = handlers::list_templates(State(state)).await;
    assert_eq!(templates.len(), 5);
}

#[tokio::test]
async fn test_not_found_body() {
    let (status, body) = error_body(handlers::not_found().await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.error, "not found");
}
