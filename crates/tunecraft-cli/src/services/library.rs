//! In-memory track library.

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use tunecraft_spec::hash::short_id;
use tunecraft_spec::{
    validate_email, BackendError, Collaborator, CollaboratorRole, InviteStatus, RequestError,
    Track,
};

use super::quota::next_utc_midnight;

/// Errors raised by library operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// No track has the given id.
    #[error("track not found: {0}")]
    NotFound(String),

    /// A track with the same id is already stored.
    #[error("track already exists: {0}")]
    Duplicate(String),

    /// The address was already invited to the track.
    #[error("{email} is already a collaborator on {track_id}")]
    AlreadyInvited {
        /// Track id.
        track_id: String,
        /// Invited address.
        email: String,
    },

    /// The daily generation allowance is used up.
    #[error(
        "daily quota of {limit} generations reached, resets at {}",
        .resets_at.to_rfc3339()
    )]
    QuotaExceeded {
        /// Generations allowed per UTC day.
        limit: u32,
        /// Start of the next UTC day.
        resets_at: DateTime<Utc>,
    },

    /// The invitation itself is malformed.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl BackendError for LibraryError {
    fn code(&self) -> &'static str {
        match self {
            LibraryError::NotFound(_) => "LIB_001",
            LibraryError::Duplicate(_) => "LIB_002",
            LibraryError::AlreadyInvited { .. } => "LIB_003",
            LibraryError::QuotaExceeded { .. } => "LIB_004",
            LibraryError::Request(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        "library"
    }
}

/// Thread-safe store of generated tracks.
#[derive(Debug, Default)]
pub struct Library {
    tracks: RwLock<Vec<Track>>,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a track.
    pub fn insert(&self, track: Track) -> Result<(), LibraryError> {
        let mut tracks = self.tracks.write();
        if tracks.iter().any(|t| t.id == track.id) {
            return Err(LibraryError::Duplicate(track.id));
        }
        tracks.push(track);
        Ok(())
    }

    /// Stores a track unless `limit` tracks already exist for the UTC day of
    /// `now`.
    ///
    /// The count and the insert happen under one write lock, so concurrent
    /// callers can never overshoot the limit.
    pub fn insert_within_quota(
        &self,
        track: Track,
        limit: u32,
        now: DateTime<Utc>,
    ) -> Result<(), LibraryError> {
        let mut tracks = self.tracks.write();
        let day = now.date_naive();
        let used = tracks
            .iter()
            .filter(|t| t.created_at.date_naive() == day)
            .count();
        if used >= limit as usize {
            return Err(LibraryError::QuotaExceeded {
                limit,
                resets_at: next_utc_midnight(now),
            });
        }
        if tracks.iter().any(|t| t.id == track.id) {
            return Err(LibraryError::Duplicate(track.id));
        }
        tracks.push(track);
        Ok(())
    }

    /// Whether a track with this id is stored.
    pub fn contains(&self, id: &str) -> bool {
        self.tracks.read().iter().any(|t| t.id == id)
    }

    /// Returns a track by id.
    pub fn get(&self, id: &str) -> Option<Track> {
        self.tracks.read().iter().find(|t| t.id == id).cloned()
    }

    /// Returns all tracks, newest first. Ties keep the later insert first.
    pub fn list(&self) -> Vec<Track> {
        let mut tracks: Vec<Track> = self.tracks.read().iter().rev().cloned().collect();
        tracks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tracks
    }

    /// Removes a track and returns it.
    pub fn remove(&self, id: &str) -> Result<Track, LibraryError> {
        let mut tracks = self.tracks.write();
        let index = tracks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?;
        Ok(tracks.remove(index))
    }

    /// Number of stored tracks.
    pub fn len(&self) -> usize {
        self.tracks.read().len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.tracks.read().is_empty()
    }

    /// Counts tracks created on a UTC calendar day.
    pub fn generated_on(&self, date: NaiveDate) -> u32 {
        let count = self
            .tracks
            .read()
            .iter()
            .filter(|t| t.created_at.date_naive() == date)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Invites a collaborator to a track.
    ///
    /// # Arguments
    /// * `track_id` - Track to share
    /// * `email` - Invitee address (compared case-insensitively)
    /// * `role` - Granted role
    pub fn invite(
        &self,
        track_id: &str,
        email: &str,
        role: CollaboratorRole,
    ) -> Result<Collaborator, LibraryError> {
        let email = email.trim();
        validate_email(email)?;

        let mut tracks = self.tracks.write();
        let track = tracks
            .iter_mut()
            .find(|t| t.id == track_id)
            .ok_or_else(|| LibraryError::NotFound(track_id.to_string()))?;

        if track
            .collaborators
            .iter()
            .any(|c| c.email.eq_ignore_ascii_case(email))
        {
            return Err(LibraryError::AlreadyInvited {
                track_id: track_id.to_string(),
                email: email.to_string(),
            });
        }

        let key = format!("{}\n{}", track_id, email.to_ascii_lowercase());
        let collaborator = Collaborator {
            id: format!("inv-{}", short_id(key.as_bytes())),
            track_id: track_id.to_string(),
            email: email.to_string(),
            role,
            status: InviteStatus::Pending,
            invited_at: Utc::now(),
        };
        track.collaborators.push(collaborator.clone());
        Ok(collaborator)
    }
}
