//! Route handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::{debug, info, warn};
use tunecraft_backend_audio::synthesize_tone_with_limit;
use tunecraft_spec::hash::{pcm_etag, request_seed};
use tunecraft_spec::{
    BackendError, Collaborator, GenerationJob, GenerationRequest, GenerationStatus, Genre, Mood,
    Profile, Quota, Template, Track,
};

use super::state::SharedState;
use super::types::{error_codes, ApiError, InviteBody, ToneQuery};
use crate::provider::ProviderError;
use crate::services::{demo_profile, quota_at, LibraryError};

/// Cache lifetime advertised for rendered tones.
pub const TONE_CACHE_CONTROL: &str = "public, max-age=3600";

type ApiResult<T> = Result<T, ApiError>;

/// Whether an `If-None-Match` header matches the given entity tag.
pub fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|tag| tag.trim().trim_start_matches("W/"))
        .any(|tag| tag == "*" || tag == etag)
}

fn header_value(value: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// `GET /api/demo-audio`
pub async fn demo_audio(
    State(state): State<SharedState>,
    request_headers: HeaderMap,
    query: Result<Query<ToneQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            error_codes::BAD_QUERY,
            rejection.body_text(),
        )
    })?;
    let spec = query.to_spec();
    let max_seconds = state.config.max_tone_seconds;

    let container = tokio::task::spawn_blocking(move || synthesize_tone_with_limit(&spec, max_seconds))
        .await
        .map_err(|e| ApiError::internal(format!("tone rendering panicked: {}", e)))?
        .map_err(|err| {
            debug!(code = err.code(), field = err.field(), "Rejected tone request");
            ApiError::from(err)
        })?;

    let tag = pcm_etag(container.pcm_data());
    let etag = header_value(&tag)?;
    let cache_control = HeaderValue::from_static(TONE_CACHE_CONTROL);

    if etag_matches(&request_headers, &tag) {
        return Ok((
            StatusCode::NOT_MODIFIED,
            [(header::ETAG, etag), (header::CACHE_CONTROL, cache_control)],
        )
            .into_response());
    }

    debug!(
        frequency = spec.frequency_hz,
        duration = spec.duration_seconds,
        sample_rate = spec.sample_rate,
        bytes = container.len(),
        "Rendered tone"
    );

    let content_length = header_value(&container.len().to_string())?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("audio/wav")),
            (header::CONTENT_LENGTH, content_length),
            (header::ACCEPT_RANGES, HeaderValue::from_static("bytes")),
            (header::CACHE_CONTROL, cache_control),
            (header::ETAG, etag),
        ],
        container.into_bytes(),
    )
        .into_response())
}

/// `GET /api/genres`
pub async fn list_genres(State(state): State<SharedState>) -> Json<Vec<Genre>> {
    Json(state.catalog.genres.clone())
}

/// `GET /api/moods`
pub async fn list_moods(State(state): State<SharedState>) -> Json<Vec<Mood>> {
    Json(state.catalog.moods.clone())
}

/// `GET /api/templates`
pub async fn list_templates(State(state): State<SharedState>) -> Json<Vec<Template>> {
    Json(state.catalog.templates.clone())
}

/// `POST /api/generate`
pub async fn generate(
    State(state): State<SharedState>,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GenerationJob>)> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            error_codes::BAD_BODY,
            rejection.body_text(),
        )
    })?;

    let request = state.catalog.resolve_request(&request)?;
    request.validate(state.config.max_track_seconds)?;

    let now = Utc::now();
    let quota = quota_at(&state.library, state.config.daily_quota, now);
    if quota.is_exhausted() {
        warn!(limit = quota.limit, "Daily generation quota exhausted");
        return Err(LibraryError::QuotaExceeded {
            limit: quota.limit,
            resets_at: quota.resets_at,
        }
        .into());
    }

    let seed = request_seed(&request)?;
    let job = state.provider.generate(&request, seed)?;

    let status = match job.track {
        Some(ref track) => {
            // Concurrent requests can all pass the check above; the slot is
            // only taken here, under the library's write lock.
            if let Err(err) =
                state
                    .library
                    .insert_within_quota(track.clone(), state.config.daily_quota, now)
            {
                state.provider.forget_track(&track.id);
                warn!(track_id = %track.id, error = %err, "Discarded generated track");
                return Err(err.into());
            }
            info!(
                track_id = %track.id,
                provider = %track.provider,
                title = %track.title,
                "Generated track"
            );
            StatusCode::CREATED
        }
        None => StatusCode::ACCEPTED,
    };
    Ok((status, Json(job)))
}

/// `GET /api/generate/:job_id`
///
/// A job whose track has since been deleted reports as unknown.
pub async fn generation_status(
    State(state): State<SharedState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<GenerationStatus>> {
    let status = state.provider.poll_status(&job_id)?;
    if let Some(track_id) = &status.track_id {
        if !state.library.contains(track_id) {
            return Err(ProviderError::UnknownJob(job_id).into());
        }
    }
    Ok(Json(status))
}

/// `GET /api/tracks`
pub async fn list_tracks(State(state): State<SharedState>) -> Json<Vec<Track>> {
    Json(state.library.list())
}

/// `GET /api/tracks/:id`
pub async fn get_track(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Track>> {
    state
        .library
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::from(LibraryError::NotFound(id)))
}

/// `DELETE /api/tracks/:id`
pub async fn delete_track(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.library.remove(&id)?;
    state.provider.forget_track(&id);
    info!(track_id = %id, "Deleted track");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/tracks/:id/collaborators`
pub async fn invite_collaborator(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<InviteBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Collaborator>)> {
    let Json(body) = body.map_err(|rejection| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            error_codes::BAD_BODY,
            rejection.body_text(),
        )
    })?;
    let collaborator = state.library.invite(&id, &body.email, body.role)?;
    info!(track_id = %id, invite_id = %collaborator.id, "Invited collaborator");
    Ok((StatusCode::CREATED, Json(collaborator)))
}

/// `GET /api/quota`
pub async fn quota(State(state): State<SharedState>) -> Json<Quota> {
    Json(quota_at(
        &state.library,
        state.config.daily_quota,
        Utc::now(),
    ))
}

/// `GET /api/profile`
pub async fn profile(State(state): State<SharedState>) -> Json<Profile> {
    let quota = quota_at(&state.library, state.config.daily_quota, Utc::now());
    Json(demo_profile(quota))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
