//! Music generation providers.
//!
//! A provider turns a validated [`GenerationRequest`] into a
//! [`GenerationJob`]. The service picks one implementation at startup:
//!
//! - [`MockProvider`]: deterministic, offline, completes immediately
//! - [`MubertProvider`] / [`SunoProvider`]: prepare the remote API call but
//!   never send it, failing with [`ProviderError::Offline`]
//! - [`FallbackProvider`]: wraps another provider and recovers with the mock

mod fallback;
mod mock;
mod remote;


use thiserror::Error;
use tunecraft_spec::{BackendError, GenerationJob, GenerationRequest, GenerationStatus};

use crate::config::{ProviderKind, ServerConfig};

pub use fallback::FallbackProvider;
pub use mock::{MockProvider, MOCK_PREVIEW_SECONDS};
pub use remote::{MubertProvider, ProviderRequest, SunoProvider};

/// Errors raised by providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No API key is configured for a remote provider.
    #[error("{provider} requires an API key")]
    MissingCredentials {
        /// Provider name.
        provider: &'static str,
    },

    /// The remote call was prepared but outbound network access is disabled.
    #[error("{provider} is unreachable: outbound calls are disabled ({endpoint})")]
    Offline {
        /// Provider name.
        provider: &'static str,
        /// Endpoint the call would have gone to.
        endpoint: String,
    },

    /// The job id is not known to this provider.
    #[error("unknown job: {0}")]
    UnknownJob(String),
}

impl BackendError for ProviderError {
    fn code(&self) -> &'static str {
        match self {
            ProviderError::MissingCredentials { .. } => "PROVIDER_001",
            ProviderError::Offline { .. } => "PROVIDER_002",
            ProviderError::UnknownJob(_) => "PROVIDER_003",
        }
    }

    fn category(&self) -> &'static str {
        "provider"
    }
}

/// A source of generated music.
pub trait MusicProvider: Send + Sync {
    /// Short provider name, recorded on every track it produces.
    fn name(&self) -> &'static str;

    /// Starts generating a track.
    ///
    /// # Arguments
    /// * `request` - A request already resolved against the catalog
    /// * `seed` - Seed derived from the request's canonical hash
    fn generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<GenerationJob, ProviderError>;

    /// Reports the progress of a job started by [`MusicProvider::generate`].
    fn poll_status(&self, job_id: &str) -> Result<GenerationStatus, ProviderError>;

    /// Drops job bookkeeping for a track that left the library. Afterwards
    /// its job polls as unknown.
    fn forget_track(&self, _track_id: &str) {}
}

/// Builds the provider described by the configuration.
pub fn select_provider(config: &ServerConfig) -> Box<dyn MusicProvider> {
    let primary: Box<dyn MusicProvider> = match config.provider {
        ProviderKind::Mock => return Box::new(MockProvider::new()),
        ProviderKind::Mubert => Box::new(MubertProvider::new(config.mubert_api_key.clone())),
        ProviderKind::Suno => Box::new(SunoProvider::new(config.suno_api_key.clone())),
    };

    if config.fallback_to_mock {
        Box::new(FallbackProvider::new(primary, MockProvider::new()))
    } else {
        primary
    }
}
