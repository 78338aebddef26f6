//! HTTP API server.
//!
//! Serves the demo tone plus the catalog, generation, library and quota
//! endpoints as JSON over HTTP/1.1.
//!
//! ## Routes
//!
//! - `GET /api/demo-audio`: render a tone (`frequency`, `duration`,
//!   `sample_rate`, `amplitude`, `fade` query overrides)
//! - `GET /api/genres`, `/api/moods`, `/api/templates`: catalog tables
//! - `POST /api/generate`, `GET /api/generate/:job_id`: start and poll jobs
//! - `GET /api/tracks`, `GET|DELETE /api/tracks/:id`: the track library
//! - `POST /api/tracks/:id/collaborators`: invite a collaborator
//! - `GET /api/quota`, `GET /api/profile`: allowance and demo profile
//!
//! Errors are JSON objects: `{"error": "<message>", "code": "<code>"}`.

mod handlers;
mod router;
mod state;
mod types;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::future::Future;
use std::net::IpAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

pub use crate::config::DEFAULT_PORT;
pub use handlers::{etag_matches, TONE_CACHE_CONTROL};
pub use router::{apply_cors, router};
pub use state::{AppState, SharedState};
pub use types::{error_codes, ApiError, ErrorBody, InviteBody, ToneQuery};

/// Installs the `tracing` subscriber used by the server.
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Run the HTTP server.
///
/// # Arguments
/// * `config_path` - Optional JSON configuration file
/// * `host` - Bind address override
/// * `port` - Port override
///
/// # Returns
/// Exit code: 0 on clean shutdown, 1 on error
pub fn run(config_path: Option<&str>, host: Option<IpAddr>, port: Option<u16>) -> Result<ExitCode> {
    init_tracing();
    let config = ServerConfig::load(config_path.map(Path::new), host, port)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    rt.block_on(async move { run_server(config).await })
}

/// Run the HTTP server (async entry point).
async fn run_server(config: ServerConfig) -> Result<ExitCode> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let state = AppState::from_config(config).shared();
    info!(%addr, provider = state.provider.name(), "Tunecraft API listening");
    info!("Press Ctrl+C to shutdown");

    // Create shutdown channel
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let shutdown_tx = Arc::new(shutdown_tx);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let signal_tx = Arc::clone(&shutdown_tx);
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            info!("Shutting down...");
            let _ = signal_tx.send(());
        }
    });

    serve(listener, state, async move {
        let _ = shutdown_rx.recv().await;
    })
    .await
    .context("Server error")?;

    info!("Server shutdown complete");
    Ok(ExitCode::SUCCESS)
}

/// Serves the API on an already bound listener until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<F>(listener: TcpListener, state: SharedState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
