//! Music suggestions attached to a routine.
//!
//! These are references only; nothing here talks to a music service.

use crate::{Error, Intensity, PlaylistSuggestion};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Music genre a user can pick alongside the intensity
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistGenre {
    Electronic,
    Lofi,
    Hiphop,
    Rock,
    Pop,
}

impl PlaylistGenre {
    pub const ALL: [PlaylistGenre; 5] = [
        PlaylistGenre::Electronic,
        PlaylistGenre::Lofi,
        PlaylistGenre::Hiphop,
        PlaylistGenre::Rock,
        PlaylistGenre::Pop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistGenre::Electronic => "electronic",
            PlaylistGenre::Lofi => "lofi",
            PlaylistGenre::Hiphop => "hiphop",
            PlaylistGenre::Rock => "rock",
            PlaylistGenre::Pop => "pop",
        }
    }

    fn suggestion(&self) -> PlaylistSuggestion {
        let (title, hint, reference) = match self {
            PlaylistGenre::Electronic => (
                "Electronic Short Mix",
                "Electronic energy",
                "https://open.spotify.com/playlist/7H0rGB63hUimokOWAFPi9S",
            ),
            PlaylistGenre::Lofi => (
                "Lofi 5-min",
                "Chill beats",
                "https://open.spotify.com/playlist/71hJFZoqd7Ow3xZq3S5PyM",
            ),
            PlaylistGenre::Hiphop => (
                "Hip-Hop Pump",
                "Hip-Hop energy",
                "https://open.spotify.com/playlist/5A5cLkWcIc5BifNOa4UZTl",
            ),
            PlaylistGenre::Rock => (
                "Rock Short",
                "Rock pump",
                "https://open.spotify.com/playlist/4BxyA2GrkSiKWwKEqVFh6r",
            ),
            PlaylistGenre::Pop => (
                "Pop Hits",
                "Pop vibes",
                "https://open.spotify.com/playlist/6v84skfMiLBEgUOEHB6LNS",
            ),
        };

        PlaylistSuggestion {
            title: title.into(),
            hint: hint.into(),
            reference: reference.into(),
        }
    }
}

impl FromStr for PlaylistGenre {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PlaylistGenre::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == key)
            .ok_or_else(|| Error::Validation(format!("Unknown playlist genre: {}", s)))
    }
}

/// Suggest music for a routine
///
/// A chosen genre maps to its fixed playlist; otherwise the suggestion is a
/// video search for a mix matching the intensity.
pub fn suggest(intensity: Intensity, genre: Option<PlaylistGenre>) -> Vec<PlaylistSuggestion> {
    if let Some(genre) = genre {
        return vec![genre.suggestion()];
    }

    let label = intensity.as_str();
    vec![PlaylistSuggestion {
        title: format!("{} mix", label),
        hint: format!("{} playlist", label),
        reference: format!(
            "https://www.youtube.com/results?search_query={}%20workout%20mix%205%20minutes",
            label
        ),
    }]
}
