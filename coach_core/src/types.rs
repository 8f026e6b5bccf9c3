//! Core domain types for MicroCoach.
//!
//! This module defines the fundamental types used throughout the system:
//! - Intensity levels and exercise units
//! - Exercise templates and the catalog that owns them
//! - Generated routines and their steps
//! - Playlist suggestions attached to a routine

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Intensity
// ============================================================================

/// Workout intensity, selecting which exercise pool and count to use
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Chill,
    Stretch,
    #[default]
    Regular,
    Intense,
    Hardcore,
}

impl Intensity {
    /// All intensities in catalog order
    pub const ALL: [Intensity; 5] = [
        Intensity::Chill,
        Intensity::Stretch,
        Intensity::Regular,
        Intensity::Intense,
        Intensity::Hardcore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Chill => "chill",
            Intensity::Stretch => "stretch",
            Intensity::Regular => "regular",
            Intensity::Intense => "intense",
            Intensity::Hardcore => "hardcore",
        }
    }

    /// Number of main exercises picked for this intensity
    pub fn selection_count(&self) -> usize {
        match self {
            Intensity::Chill | Intensity::Stretch | Intensity::Regular => 5,
            Intensity::Intense | Intensity::Hardcore => 6,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Intensity::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == key)
            .ok_or_else(|| Error::UnknownIntensity(s.to_string()))
    }
}

// ============================================================================
// Exercise Types
// ============================================================================

/// How an exercise is measured
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Timed hold or interval, in seconds
    #[default]
    Time,
    /// Repetition count
    Reps,
}

/// An exercise entry in the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: String,
    pub slug: String,
    /// Nominal weight in seconds (or rep count for REPS entries)
    pub base_duration: u32,
    pub unit: Unit,
    pub notes: Option<String>,
}

impl ExerciseTemplate {
    /// Timed exercise with no notes
    pub fn timed(name: &str, base_duration: u32, slug: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            base_duration,
            unit: Unit::Time,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

// ============================================================================
// Routine Types
// ============================================================================

/// One step of a generated routine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutineStep {
    pub name: String,
    pub slug: String,
    pub unit: Unit,
    /// Seconds for TIME steps, repetitions for REPS steps
    pub duration_or_reps: u32,
    #[serde(default)]
    pub notes: String,
}

/// Externally resolvable music suggestion
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistSuggestion {
    pub title: String,
    pub hint: String,
    pub reference: String,
}

/// A generated workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Routine {
    pub total_duration_seconds: u32,
    pub total_duration_minutes: u32,
    pub intensity_label: Intensity,
    pub main: Vec<RoutineStep>,
    #[serde(default)]
    pub cooldown: Vec<RoutineStep>,
    #[serde(default)]
    pub playlist: Vec<PlaylistSuggestion>,
}

impl Routine {
    /// Sum of TIME-unit seconds in the main block
    pub fn main_seconds(&self) -> u32 {
        timed_seconds(&self.main)
    }

    /// Sum of TIME-unit seconds in the cooldown block
    pub fn cooldown_seconds(&self) -> u32 {
        timed_seconds(&self.cooldown)
    }

    /// Main steps followed by cooldown steps, in execution order
    pub fn all_steps(&self) -> impl Iterator<Item = &RoutineStep> {
        self.main.iter().chain(self.cooldown.iter())
    }
}

pub(crate) fn timed_seconds(steps: &[RoutineStep]) -> u32 {
    steps
        .iter()
        .filter(|s| s.unit == Unit::Time)
        .map(|s| s.duration_or_reps)
        .sum()
}

// ============================================================================
// Catalog Type
// ============================================================================

/// Read-only exercise pools keyed by intensity, plus a shared cooldown pool
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub pools: HashMap<Intensity, Vec<ExerciseTemplate>>,
    pub cooldown: Vec<ExerciseTemplate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_parse_is_case_insensitive() {
        assert_eq!("Chill".parse::<Intensity>().unwrap(), Intensity::Chill);
        assert_eq!(" HARDCORE ".parse::<Intensity>().unwrap(), Intensity::Hardcore);
    }

    #[test]
    fn test_unknown_intensity_rejected() {
        let err = "extreme".parse::<Intensity>().unwrap_err();
        assert!(matches!(err, Error::UnknownIntensity(ref s) if s == "extreme"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_selection_counts() {
        assert_eq!(Intensity::Regular.selection_count(), 5);
        assert_eq!(Intensity::Hardcore.selection_count(), 6);
    }

    #[test]
    fn test_step_wire_format() {
        let step = RoutineStep {
            name: "Plank".into(),
            slug: "plank".into(),
            unit: Unit::Time,
            duration_or_reps: 40,
            notes: String::new(),
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["unit"], "time");
        assert_eq!(json["duration_or_reps"], 40);
    }

    #[test]
    fn test_main_seconds_ignores_reps() {
        let routine = Routine {
            total_duration_seconds: 60,
            total_duration_minutes: 1,
            intensity_label: Intensity::Regular,
            main: vec![
                RoutineStep {
                    name: "A".into(),
                    slug: "a".into(),
                    unit: Unit::Time,
                    duration_or_reps: 60,
                    notes: String::new(),
                },
                RoutineStep {
                    name: "B".into(),
                    slug: "b".into(),
                    unit: Unit::Reps,
                    duration_or_reps: 12,
                    notes: String::new(),
                },
            ],
            cooldown: vec![],
            playlist: vec![],
        };
        assert_eq!(routine.main_seconds(), 60);
        assert_eq!(routine.all_steps().count(), 2);
    }
}
