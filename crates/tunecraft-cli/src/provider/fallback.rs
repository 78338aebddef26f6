//! Recovery wrapper around a primary provider.

use tracing::warn;
use tunecraft_spec::{BackendError, GenerationJob, GenerationRequest, GenerationStatus};

use super::{MockProvider, MusicProvider, ProviderError};

/// Sends every call to the primary provider and retries failures on the mock.
pub struct FallbackProvider {
    primary: Box<dyn MusicProvider>,
    fallback: MockProvider,
}

impl FallbackProvider {
    /// Wraps `primary`, recovering with `fallback`.
    pub fn new(primary: Box<dyn MusicProvider>, fallback: MockProvider) -> Self {
        Self { primary, fallback }
    }
}

impl MusicProvider for FallbackProvider {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<GenerationJob, ProviderError> {
        match self.primary.generate(request, seed) {
            Ok(job) => Ok(job),
            Err(err) => {
                warn!(
                    provider = self.primary.name(),
                    code = err.code(),
                    error = %err,
                    "Provider failed, falling back to mock"
                );
                self.fallback.generate(request, seed)
            }
        }
    }

    fn poll_status(&self, job_id: &str) -> Result<GenerationStatus, ProviderError> {
        // Jobs the mock issued during a fallback are only known to the mock.
        if let Ok(status) = self.fallback.poll_status(job_id) {
            return Ok(status);
        }
        self.primary.poll_status(job_id)
    }

    fn forget_track(&self, track_id: &str) {
        self.fallback.forget_track(track_id);
        self.primary.forget_track(track_id);
    }
}
