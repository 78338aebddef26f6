//! Deterministic offline provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use rand::Rng;
use tunecraft_spec::hash::short_id;
use tunecraft_spec::{GenerationJob, GenerationRequest, GenerationStatus, Track, TrackStatus};

use super::{MusicProvider, ProviderError};
use crate::rng::create_component_rng;

/// Longest preview the mock links to, in seconds.
pub const MOCK_PREVIEW_SECONDS: u32 = 10;

const ADJECTIVES: &[&str] = &[
    "Velvet", "Neon", "Hollow", "Golden", "Drifting", "Silent", "Electric", "Paper", "Midnight",
    "Crystal", "Faded", "Wild",
];

const NOUNS: &[&str] = &[
    "Horizon", "Echoes", "Tides", "Lanterns", "Static", "Orchard", "Skyline", "Embers", "Harbor",
    "Signals", "Meadow", "Rain",
];

/// A minor pentatonic across two octaves, in Hz.
const NOTES_HZ: &[f64] = &[
    220.0, 261.63, 293.66, 329.63, 392.0, 440.0, 523.25, 587.33, 659.25,
];

const TEMPO_BPM: [u16; 2] = [70, 140];

/// Provider that invents tracks from the request seed.
///
/// Title, tempo and preview pitch depend only on the seed. Job and track ids
/// additionally mix in a per-provider counter so repeated requests stay
/// distinct in the library.
#[derive(Debug, Default)]
pub struct MockProvider {
    counter: AtomicU64,
    jobs: RwLock<HashMap<String, String>>,
}

impl MockProvider {
    /// Creates a mock provider with no jobs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the track a seed maps to, without registering a job.
    pub fn compose(&self, request: &GenerationRequest, seed: u32, id: &str) -> Track {
        let mut title_rng = create_component_rng(seed, "title");
        let adjective = ADJECTIVES.choose(&mut title_rng).copied().unwrap_or("Untitled");
        let noun = NOUNS.choose(&mut title_rng).copied().unwrap_or("Track");

        let tempo_bpm = create_component_rng(seed, "tempo").gen_range(TEMPO_BPM[0]..=TEMPO_BPM[1]);
        let frequency = NOTES_HZ
            .choose(&mut create_component_rng(seed, "pitch"))
            .copied()
            .unwrap_or(440.0);

        let duration_seconds = request.effective_duration();
        let preview = duration_seconds.min(MOCK_PREVIEW_SECONDS);

        Track {
            id: format!("trk-{}", id),
            title: format!("{} {}", adjective, noun),
            prompt: request.prompt.trim().to_string(),
            genre: request.genre.clone(),
            mood: request.mood.clone(),
            duration_seconds,
            tempo_bpm,
            audio_url: format!(
                "/api/demo-audio?frequency={:.2}&duration={}",
                frequency, preview
            ),
            status: TrackStatus::Completed,
            provider: self.name().to_string(),
            created_at: Utc::now(),
            collaborators: Vec::new(),
        }
    }

    fn next_id(&self, seed: u32) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let mut input = Vec::with_capacity(12);
        input.extend_from_slice(&seed.to_le_bytes());
        input.extend_from_slice(&n.to_le_bytes());
        short_id(&input)
    }
}

impl MusicProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        seed: u32,
    ) -> Result<GenerationJob, ProviderError> {
        let id = self.next_id(seed);
        let job_id = format!("mock-{}", id);
        let track = self.compose(request, seed, &id);

        self.jobs.write().insert(job_id.clone(), track.id.clone());

        Ok(GenerationJob {
            job_id,
            status: TrackStatus::Completed,
            track: Some(track),
        })
    }

    fn poll_status(&self, job_id: &str) -> Result<GenerationStatus, ProviderError> {
        let jobs = self.jobs.read();
        let track_id = jobs
            .get(job_id)
            .ok_or_else(|| ProviderError::UnknownJob(job_id.to_string()))?;
        Ok(GenerationStatus {
            job_id: job_id.to_string(),
            status: TrackStatus::Completed,
            progress: 100,
            track_id: Some(track_id.clone()),
        })
    }

    fn forget_track(&self, track_id: &str) {
        self.jobs.write().retain(|_, id| id != track_id);
    }
}
