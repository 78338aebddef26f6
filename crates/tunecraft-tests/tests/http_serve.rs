//! Integration tests for the HTTP API server.
//!
//! These tests start the server on an ephemeral port and talk to it with an
//! HTTP client, so routing, middleware and serialization are all covered.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tunecraft-tests --test http_serve
//! ```

use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Cursor;

use tunecraft_cli::config::ServerConfig;
use tunecraft_spec::{Collaborator, GenerationJob, Quota, Track, TrackStatus};
use tunecraft_tests::TestServer;

#[tokio::test]
async fn test_demo_audio_serves_wav() {
    let server = TestServer::start().await;
    let response = server.get("/api/demo-audio").await;

    response.assert_status(200);
    assert_eq!(response.header("content-type"), Some("audio/wav"));
    assert_eq!(response.header("content-length"), Some("88244"));
    assert_eq!(response.header("accept-ranges"), Some("bytes"));
    assert_eq!(response.header("cache-control"), Some("public, max-age=3600"));
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(response.body.len(), 88244);

    let reader = hound::WavReader::new(Cursor::new(&response.body)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.duration(), 44100);

    server.stop().await;
}

#[tokio::test]
async fn test_demo_audio_query_overrides() {
    let server = TestServer::start().await;
    let response = server
        .get("/api/demo-audio?frequency=880&duration=0.5&sample_rate=8000&fade=0")
        .await;

    response.assert_status(200);
    assert_eq!(response.body.len(), 44 + 4000 * 2);
    let reader = hound::WavReader::new(Cursor::new(&response.body)).unwrap();
    assert_eq!(reader.spec().sample_rate, 8000);
}

#[tokio::test]
async fn test_demo_audio_etag_revalidation() {
    let server = TestServer::start().await;
    let first = server.get("/api/demo-audio").await;
    let etag = first.header("etag").expect("missing ETag").to_string();
    assert!(etag.starts_with('"') && etag.ends_with('"'));

    let second = server
        .request("GET", "/api/demo-audio", &[("If-None-Match", etag.as_str())], None)
        .await;
    second.assert_status(304);
    assert_eq!(second.header("etag"), Some(etag.as_str()));
    assert!(second.body.is_empty());

    let other = server.get("/api/demo-audio?frequency=220").await;
    assert_ne!(other.header("etag"), Some(etag.as_str()));
}

#[tokio::test]
async fn test_demo_audio_rejects_bad_queries() {
    let server = TestServer::start().await;

    let response = server.get("/api/demo-audio?amplitude=2").await;
    response.assert_status(400);
    assert_eq!(response.json()["code"], "TONE_005");

    let response = server.get("/api/demo-audio?frequency=abc").await;
    response.assert_status(400);
    assert_eq!(response.json()["code"], "HTTP_001");

    let response = server.get("/api/demo-audio?duration=31").await;
    response.assert_status(400);
    assert_eq!(response.json()["code"], "TONE_003");
}

#[tokio::test]
async fn test_catalog_routes() {
    let server = TestServer::start().await;

    let genres = server.get("/api/genres").await;
    genres.assert_status(200);
    let genres = genres.json();
    assert_eq!(genres.as_array().unwrap().len(), 9);
    assert_eq!(genres[0]["id"], "electronic");

    let moods = server.get("/api/moods").await.json();
    assert_eq!(moods.as_array().unwrap().len(), 8);

    let templates = server.get("/api/templates").await.json();
    assert_eq!(templates.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_generate_track_lifecycle() {
    let server = TestServer::start().await;

    let response = server
        .post_json(
            "/api/generate",
            &json!({"prompt": "rain on a tin roof", "genre": "lofi", "mood": "calm", "durationSeconds": 45}),
        )
        .await;
    response.assert_status(201);
    let job: GenerationJob = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(job.status, TrackStatus::Completed);
    let track = job.track.expect("mock provider completes immediately");
    assert_eq!(track.genre.as_deref(), Some("lofi"));
    assert_eq!(track.mood.as_deref(), Some("calm"));
    assert_eq!(track.duration_seconds, 45);
    assert_eq!(track.provider, "mock");
    assert!(track.audio_url.starts_with("/api/demo-audio?"));

    // The preview link is served by the same API.
    server.get(&track.audio_url).await.assert_status(200);

    let status = server.get(&format!("/api/generate/{}", job.job_id)).await;
    status.assert_status(200);
    let status = status.json();
    assert_eq!(status["status"], "completed");
    assert_eq!(status["progress"], 100);
    assert_eq!(status["trackId"], track.id.as_str());

    let tracks: Vec<Track> = serde_json::from_slice(&server.get("/api/tracks").await.body).unwrap();
    assert_eq!(tracks, vec![track.clone()]);

    let fetched = server.get(&format!("/api/tracks/{}", track.id)).await;
    fetched.assert_status(200);
    let fetched: Track = serde_json::from_slice(&fetched.body).unwrap();
    assert_eq!(fetched, track);

    let deleted = server.delete(&format!("/api/tracks/{}", track.id)).await;
    deleted.assert_status(204);
    assert!(deleted.body.is_empty());

    let missing = server.get(&format!("/api/tracks/{}", track.id)).await;
    missing.assert_status(404);
    assert_eq!(missing.json()["code"], "LIB_001");

    server.delete(&format!("/api/tracks/{}", track.id)).await.assert_status(404);

    // The job of a deleted track is gone too.
    let expired = server.get(&format!("/api/generate/{}", job.job_id)).await;
    expired.assert_status(404);
    assert_eq!(expired.json()["code"], "PROVIDER_003");
}

#[tokio::test]
async fn test_generate_rejects_invalid_requests() {
    let server = TestServer::start().await;

    let response = server.post_json("/api/generate", &json!({"prompt": "  "})).await;
    response.assert_status(400);
    assert_eq!(response.json()["code"], "REQ_001");

    let response = server
        .post_json("/api/generate", &json!({"prompt": "x", "genre": "polka"}))
        .await;
    response.assert_status(400);
    assert_eq!(response.json()["code"], "REQ_004");

    let response = server
        .post_json("/api/generate", &json!({"prompt": "x", "durationSeconds": 301}))
        .await;
    response.assert_status(400);
    assert_eq!(response.json()["code"], "REQ_003");

    let response = server
        .request(
            "POST",
            "/api/generate",
            &[("Content-Type", "application/json")],
            Some(b"{not json".as_slice()),
        )
        .await;
    response.assert_status(400);
    assert_eq!(response.json()["code"], "HTTP_002");

    let response = server.get("/api/generate/mock-unknown").await;
    response.assert_status(404);
    assert_eq!(response.json()["code"], "PROVIDER_003");
}

#[tokio::test]
async fn test_daily_quota_is_enforced() {
    let config = ServerConfig {
        daily_quota: 2,
        ..ServerConfig::default()
    };
    let server = TestServer::start_with(config).await;

    for prompt in ["first", "second"] {
        server
            .post_json("/api/generate", &json!({ "prompt": prompt }))
            .await
            .assert_status(201);
    }

    let response = server.post_json("/api/generate", &json!({"prompt": "third"})).await;
    response.assert_status(429);
    assert_eq!(response.json()["code"], "HTTP_004");

    let quota: Quota = serde_json::from_slice(&server.get("/api/quota").await.body).unwrap();
    assert_eq!(quota.limit, 2);
    assert_eq!(quota.used, 2);
    assert_eq!(quota.remaining, 0);

    let profile = server.get("/api/profile").await.json();
    assert_eq!(profile["quota"]["used"], 2);
    assert_eq!(profile["quota"]["plan"], "free");
}

#[tokio::test]
async fn test_invite_collaborators() {
    let server = TestServer::start().await;
    let job: GenerationJob = serde_json::from_slice(
        &server
            .post_json("/api/generate", &json!({"prompt": "a duet"}))
            .await
            .body,
    )
    .unwrap();
    let track_id = job.track.unwrap().id;
    let path = format!("/api/tracks/{}/collaborators", track_id);

    let response = server
        .post_json(&path, &json!({"email": "Mia@Example.com", "role": "editor"}))
        .await;
    response.assert_status(201);
    let invite: Collaborator = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(invite.track_id, track_id);
    assert_eq!(invite.email, "Mia@Example.com");

    let duplicate = server
        .post_json(&path, &json!({"email": "mia@example.com"}))
        .await;
    duplicate.assert_status(409);
    assert_eq!(duplicate.json()["code"], "LIB_003");

    let invalid = server.post_json(&path, &json!({"email": "not-an-email"})).await;
    invalid.assert_status(400);

    let track: Track =
        serde_json::from_slice(&server.get(&format!("/api/tracks/{}", track_id)).await.body).unwrap();
    assert_eq!(track.collaborators, vec![invite]);

    server
        .post_json(
            "/api/tracks/trk-missing/collaborators",
            &json!({"email": "mia@example.com"}),
        )
        .await
        .assert_status(404);
}

#[tokio::test]
async fn test_cors_preflight() {
    let server = TestServer::start().await;
    let response = server
        .request(
            "OPTIONS",
            "/api/generate",
            &[
                ("Origin", "http://localhost:5173"),
                ("Access-Control-Request-Method", "POST"),
            ],
            None,
        )
        .await;

    response.assert_status(204);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        response.header("access-control-allow-methods"),
        Some("GET, POST, DELETE, OPTIONS")
    );
    assert!(response
        .header("access-control-allow-headers")
        .unwrap()
        .contains("Content-Type"));
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let server = TestServer::start().await;
    let response = server.get("/api/nope").await;

    response.assert_status(404);
    assert_eq!(response.json()["error"], "not found");
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_server_stops_on_shutdown_signal() {
    let server = TestServer::start().await;
    let addr = server.addr();
    server.get("/api/genres").await.assert_status(200);
    server.stop().await;

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
