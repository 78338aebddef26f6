//! Remote text-to-music providers.
//!
//! Both providers build the exact request they would send, then stop: the
//! service makes no outbound calls, so every attempt ends in
//! [`ProviderError::Offline`] naming the prepared endpoint.

use serde_json::json;
use tunecraft_spec::{GenerationJob, GenerationRequest, GenerationStatus};

use super::{MusicProvider, ProviderError};

const MUBERT_ENDPOINT: &str = "https://api-b2b.mubert.com/v2";
const SUNO_ENDPOINT: &str = "https://api.suno.ai/v1";

/// An outbound HTTP call, fully prepared.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// HTTP method.
    pub method: &'static str,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl ProviderRequest {
    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Joins prompt, genre and mood into the single text prompt remote APIs take.
fn describe(request: &GenerationRequest) -> String {
    let mut text = request.prompt.trim().to_string();
    for tag in [&request.genre, &request.mood].into_iter().flatten() {
        text.push_str(", ");
        text.push_str(tag);
    }
    text
}

/// Mubert B2B text-to-music API.
#[derive(Debug, Clone)]
pub struct MubertProvider {
    api_key: Option<String>,
}

impl MubertProvider {
    /// Creates the provider with an optional personal access token.
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingCredentials { provider: "mubert" })
    }

    /// Prepares the track-recording call for a request.
    pub fn build_generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<ProviderRequest, ProviderError> {
        let pat = self.key()?;
        Ok(ProviderRequest {
            method: "POST",
            url: format!("{}/TTMRecordTrack", MUBERT_ENDPOINT),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(json!({
                "method": "TTMRecordTrack",
                "params": {
                    "pat": pat,
                    "text": describe(request),
                    "duration": request.effective_duration(),
                    "format": "wav",
                    "mode": "track",
                    "seed": seed,
                }
            })),
        })
    }

    /// Prepares the status call for a job.
    pub fn build_status(&self, job_id: &str) -> Result<ProviderRequest, ProviderError> {
        let pat = self.key()?;
        Ok(ProviderRequest {
            method: "POST",
            url: format!("{}/TrackStatus", MUBERT_ENDPOINT),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(json!({
                "method": "TrackStatus",
                "params": { "pat": pat, "task_id": job_id }
            })),
        })
    }
}

impl MusicProvider for MubertProvider {
    fn name(&self) -> &'static str {
        "mubert"
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<GenerationJob, ProviderError> {
        let prepared = self.build_generate(request, seed)?;
        Err(ProviderError::Offline {
            provider: self.name(),
            endpoint: prepared.url,
        })
    }

    fn poll_status(&self, job_id: &str) -> Result<GenerationStatus, ProviderError> {
        let prepared = self.build_status(job_id)?;
        Err(ProviderError::Offline {
            provider: self.name(),
            endpoint: prepared.url,
        })
    }
}

/// Suno song generation API.
#[derive(Debug, Clone)]
pub struct SunoProvider {
    api_key: Option<String>,
}

impl SunoProvider {
    /// Creates the provider with an optional bearer token.
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn auth_headers(&self) -> Result<Vec<(String, String)>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingCredentials { provider: "suno" })?;
        Ok(vec![
            ("Authorization".to_string(), format!("Bearer {}", key)),
            ("Content-Type".to_string(), "application/json".to_string()),
        ])
    }

    /// Prepares the generation call for a request.
    pub fn build_generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<ProviderRequest, ProviderError> {
        let headers = self.auth_headers()?;
        let tags: Vec<&str> = [&request.genre, &request.mood]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        Ok(ProviderRequest {
            method: "POST",
            url: format!("{}/generate", SUNO_ENDPOINT),
            headers,
            body: Some(json!({
                "prompt": request.prompt.trim(),
                "tags": tags.join(","),
                "duration": request.effective_duration(),
                "make_instrumental": true,
                "seed": seed,
            })),
        })
    }

    /// Prepares the status call for a job.
    pub fn build_status(&self, job_id: &str) -> Result<ProviderRequest, ProviderError> {
        let headers = self.auth_headers()?;
        Ok(ProviderRequest {
            method: "GET",
            url: format!("{}/generate/{}", SUNO_ENDPOINT, job_id),
            headers,
            body: None,
        })
    }
}

impl MusicProvider for SunoProvider {
    fn name(&self) -> &'static str {
        "suno"
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<GenerationJob, ProviderError> {
        let prepared = self.build_generate(request, seed)?;
        Err(ProviderError::Offline {
            provider: self.name(),
            endpoint: prepared.url,
        })
    }

    fn poll_status(&self, job_id: &str) -> Result<GenerationStatus, ProviderError> {
        let prepared = self.build_status(job_id)?;
        Err(ProviderError::Offline {
            provider: self.name(),
            endpoint: prepared.url,
        })
    }
}
