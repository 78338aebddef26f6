//! Track, generation, collaboration and quota types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Longest accepted prompt, in characters.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Track length used when a request does not name one.
pub const DEFAULT_TRACK_SECONDS: u32 = 30;

/// A request to generate a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Free-text description of the desired music.
    pub prompt: String,
    /// Genre id from the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Mood id from the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Requested length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Template id whose values fill unset fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl GenerationRequest {
    /// Creates a request with only a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            genre: None,
            mood: None,
            duration_seconds: None,
            template_id: None,
        }
    }

    /// Sets the genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Sets the mood.
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Sets the duration.
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Sets the template.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Requested duration, or [`DEFAULT_TRACK_SECONDS`].
    pub fn effective_duration(&self) -> u32 {
        self.duration_seconds.unwrap_or(DEFAULT_TRACK_SECONDS)
    }

    /// Checks the prompt and duration. Catalog references are checked by
    /// [`crate::Catalog::resolve_request`].
    pub fn validate(&self, max_seconds: u32) -> Result<(), RequestError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        let len = prompt.chars().count();
        if len > MAX_PROMPT_CHARS {
            return Err(RequestError::PromptTooLong {
                len,
                max: MAX_PROMPT_CHARS,
            });
        }

        let duration = self.effective_duration();
        if duration == 0 || duration > max_seconds {
            return Err(RequestError::Duration {
                duration,
                max: max_seconds,
            });
        }
        Ok(())
    }
}

/// Lifecycle of a generated track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    /// Accepted, not yet started.
    Queued,
    /// Provider is rendering.
    Processing,
    /// Audio is available.
    Completed,
    /// Provider gave up.
    Failed,
}

impl TrackStatus {
    /// Returns the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackStatus::Queued => "queued",
            TrackStatus::Processing => "processing",
            TrackStatus::Completed => "completed",
            TrackStatus::Failed => "failed",
        }
    }

    /// Whether polling can stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrackStatus::Completed | TrackStatus::Failed)
    }
}

impl std::fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A track in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Track id.
    pub id: String,
    /// Generated title.
    pub title: String,
    /// The prompt the track was generated from.
    pub prompt: String,
    /// Genre id, if any.
    pub genre: Option<String>,
    /// Mood id, if any.
    pub mood: Option<String>,
    /// Length in seconds.
    pub duration_seconds: u32,
    /// Tempo in BPM.
    pub tempo_bpm: u16,
    /// Where the audio can be fetched.
    pub audio_url: String,
    /// Lifecycle status.
    pub status: TrackStatus,
    /// Name of the provider that produced the track.
    pub provider: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Invited collaborators.
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
}

/// A generation job as reported by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationJob {
    /// Provider-assigned job id.
    pub job_id: String,
    /// Current status.
    pub status: TrackStatus,
    /// The finished track, once available.
    pub track: Option<Track>,
}

/// Progress report for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatus {
    /// Provider-assigned job id.
    pub job_id: String,
    /// Current status.
    pub status: TrackStatus,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    /// Library id of the finished track.
    pub track_id: Option<String>,
}

/// Permission granted to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorRole {
    /// Can listen and comment.
    #[default]
    Viewer,
    /// Can also remix and edit metadata.
    Editor,
}

/// Invitation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    /// Sent, not yet answered.
    Pending,
    /// Accepted by the invitee.
    Accepted,
}

/// A collaborator invited to a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    /// Invitation id.
    pub id: String,
    /// Track the invitation is for.
    pub track_id: String,
    /// Invitee email.
    pub email: String,
    /// Granted role.
    pub role: CollaboratorRole,
    /// Invitation state.
    pub status: InviteStatus,
    /// When the invitation was sent (UTC).
    pub invited_at: DateTime<Utc>,
}

/// Checks that an email address has a plausible `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), RequestError> {
    let invalid = || RequestError::InvalidEmail(email.to_string());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(())
}

/// Subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// Daily-limited free tier.
    #[default]
    Free,
    /// Paid tier.
    Pro,
}

/// Generation allowance for the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    /// Plan the allowance belongs to.
    pub plan: Plan,
    /// Generations allowed per period.
    pub limit: u32,
    /// Generations used this period.
    pub used: u32,
    /// Generations left this period.
    pub remaining: u32,
    /// When the period rolls over (UTC).
    pub resets_at: DateTime<Utc>,
}

impl Quota {
    /// Creates a quota, deriving `remaining`.
    pub fn new(plan: Plan, limit: u32, used: u32, resets_at: DateTime<Utc>) -> Self {
        Self {
            plan,
            limit,
            used,
            remaining: limit.saturating_sub(used),
            resets_at,
        }
    }

    /// Whether no generations are left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Current plan.
    pub plan: Plan,
    /// Current allowance.
    pub quota: Quota,
}
