//! Route table and middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tracing::debug;

use super::handlers;
use super::state::SharedState;

const ALLOW_METHODS: &str = "GET, POST, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, If-None-Match";
const EXPOSE_HEADERS: &str = "Content-Length, ETag";

/// Builds the API router over shared state.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/demo-audio", get(handlers::demo_audio))
        .route("/api/genres", get(handlers::list_genres))
        .route("/api/moods", get(handlers::list_moods))
        .route("/api/templates", get(handlers::list_templates))
        .route("/api/generate", post(handlers::generate))
        .route("/api/generate/:job_id", get(handlers::generation_status))
        .route("/api/tracks", get(handlers::list_tracks))
        .route(
            "/api/tracks/:id",
            get(handlers::get_track).delete(handlers::delete_track),
        )
        .route(
            "/api/tracks/:id/collaborators",
            post(handlers::invite_collaborator),
        )
        .route("/api/quota", get(handlers::quota))
        .route("/api/profile", get(handlers::profile))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Adds the permissive CORS headers to a response.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSE_HEADERS),
    );
}

/// Answers preflight requests and decorates every other response.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };
    apply_cors(response.headers_mut());
    response
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    debug!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Handled request"
    );
    response
}
