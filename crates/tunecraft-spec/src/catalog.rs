//! Catalog types: genres, moods and composition templates.
//!
//! The built-in tables double as the fallback data served when a configured
//! catalog source cannot be read.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::track::GenerationRequest;

/// A musical genre offered by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    /// Stable identifier (e.g. "lofi").
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Typical tempo range in BPM, inclusive.
    pub tempo_bpm: [u16; 2],
}

/// An emotional mood tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mood {
    /// Stable identifier (e.g. "calm").
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
}

/// A preset combination of genre, mood and length for the studio view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Genre id.
    pub genre: String,
    /// Mood id.
    pub mood: String,
    /// Suggested track length in seconds.
    pub duration_seconds: u32,
    /// One-line description.
    pub description: String,
}

/// All catalog tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Available genres.
    pub genres: Vec<Genre>,
    /// Available moods.
    pub moods: Vec<Mood>,
    /// Composition templates.
    #[serde(default)]
    pub templates: Vec<Template>,
}

fn genre(id: &str, name: &str, description: &str, tempo_bpm: [u16; 2]) -> Genre {
    Genre {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        tempo_bpm,
    }
}

fn mood(id: &str, name: &str, description: &str) -> Mood {
    Mood {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn template(
    id: &str,
    name: &str,
    genre: &str,
    mood: &str,
    duration_seconds: u32,
    description: &str,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        genre: genre.to_string(),
        mood: mood.to_string(),
        duration_seconds,
        description: description.to_string(),
    }
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            genres: vec![
                genre("electronic", "Electronic", "Synth-driven beats and textures", [110, 140]),
                genre("lofi", "Lo-Fi", "Dusty drums and mellow keys", [70, 90]),
                genre("ambient", "Ambient", "Slow evolving pads and drones", [60, 80]),
                genre("rock", "Rock", "Guitars, bass and live drums", [100, 160]),
                genre("pop", "Pop", "Hook-first songs with bright production", [95, 130]),
                genre("jazz", "Jazz", "Swing, extended chords and improvisation", [80, 180]),
                genre("classical", "Classical", "Orchestral and chamber arrangements", [60, 120]),
                genre("hiphop", "Hip-Hop", "Boom-bap and trap rhythms", [80, 100]),
                genre("cinematic", "Cinematic", "Score-style builds for picture", [70, 120]),
            ],
            moods: vec![
                mood("happy", "Happy", "Bright and cheerful"),
                mood("calm", "Calm", "Relaxed and unhurried"),
                mood("energetic", "Energetic", "Driving and intense"),
                mood("melancholic", "Melancholic", "Wistful and bittersweet"),
                mood("dark", "Dark", "Tense and brooding"),
                mood("uplifting", "Uplifting", "Hopeful and rising"),
                mood("romantic", "Romantic", "Warm and intimate"),
                mood("mysterious", "Mysterious", "Curious and unresolved"),
            ],
            templates: vec![
                template(
                    "study-session",
                    "Study Session",
                    "lofi",
                    "calm",
                    120,
                    "Low-key loop for focused work",
                ),
                template(
                    "workout-drive",
                    "Workout Drive",
                    "electronic",
                    "energetic",
                    180,
                    "Four-on-the-floor energy",
                ),
                template(
                    "trailer-rise",
                    "Trailer Rise",
                    "cinematic",
                    "uplifting",
                    90,
                    "Slow build into a big finish",
                ),
                template(
                    "night-drive",
                    "Night Drive",
                    "electronic",
                    "mysterious",
                    150,
                    "Pulsing synths after midnight",
                ),
                template(
                    "rainy-cafe",
                    "Rainy Cafe",
                    "jazz",
                    "romantic",
                    120,
                    "Brushed drums and soft piano",
                ),
            ],
        }
    }

    /// Looks up a genre by id.
    pub fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }

    /// Looks up a mood by id.
    pub fn mood(&self, id: &str) -> Option<&Mood> {
        self.moods.iter().find(|m| m.id == id)
    }

    /// Looks up a template by id.
    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Applies a template to a request and checks every catalog reference.
    ///
    /// Template values only fill fields the request left unset.
    pub fn resolve_request(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationRequest, RequestError> {
        let mut resolved = request.clone();

        if let Some(ref template_id) = request.template_id {
            let template = self
                .template(template_id)
                .ok_or_else(|| RequestError::UnknownTemplate(template_id.clone()))?;
            resolved.genre.get_or_insert_with(|| template.genre.clone());
            resolved.mood.get_or_insert_with(|| template.mood.clone());
            resolved
                .duration_seconds
                .get_or_insert(template.duration_seconds);
        }

        if let Some(ref id) = resolved.genre {
            if self.genre(id).is_none() {
                return Err(RequestError::UnknownGenre(id.clone()));
            }
        }
        if let Some(ref id) = resolved.mood {
            if self.mood(id).is_none() {
                return Err(RequestError::UnknownMood(id.clone()));
            }
        }

        Ok(resolved)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<_> = catalog.genres.iter().map(|g| g.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.genres.len());
    }

    #[test]
    fn test_builtin_templates_reference_known_entries() {
        let catalog = Catalog::builtin();
        for t in &catalog.templates {
            assert!(catalog.genre(&t.genre).is_some(), "{}", t.id);
            assert!(catalog.mood(&t.mood).is_some(), "{}", t.id);
        }
    }

    #[test]
    fn test_tempo_ranges_ordered() {
        for g in Catalog::builtin().genres {
            assert!(g.tempo_bpm[0] <= g.tempo_bpm[1], "{}", g.id);
        }
    }

    #[test]
    fn test_resolve_applies_template_defaults() {
        let catalog = Catalog::builtin();
        let request = GenerationRequest::new("focus").with_template("study-session");
        let resolved = catalog.resolve_request(&request).unwrap();
        assert_eq!(resolved.genre.as_deref(), Some("lofi"));
        assert_eq!(resolved.mood.as_deref(), Some("calm"));
        assert_eq!(resolved.duration_seconds, Some(120));
    }

    #[test]
    fn test_resolve_keeps_explicit_fields() {
        let catalog = Catalog::builtin();
        let request = GenerationRequest::new("focus")
            .with_template("study-session")
            .with_mood("dark");
        let resolved = catalog.resolve_request(&request).unwrap();
        assert_eq!(resolved.mood.as_deref(), Some("dark"));
    }

    #[test]
    fn test_resolve_rejects_unknown_ids() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.resolve_request(&GenerationRequest::new("x").with_genre("polka")),
            Err(RequestError::UnknownGenre("polka".to_string()))
        );
        assert_eq!(
            catalog.resolve_request(&GenerationRequest::new("x").with_mood("hangry")),
            Err(RequestError::UnknownMood("hangry".to_string()))
        );
        assert_eq!(
            catalog.resolve_request(&GenerationRequest::new("x").with_template("nope")),
            Err(RequestError::UnknownTemplate("nope".to_string()))
        );
    }

    #[test]
    fn test_catalog_json_uses_camel_case() {
        let json = serde_json::to_string(&Catalog::builtin().genres[0]).unwrap();
        assert!(json.contains("\"tempoBpm\":[110,140]"));
    }
}
