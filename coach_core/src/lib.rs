#![forbid(unsafe_code)]

//! Core domain model and business logic for MicroCoach.
//!
//! This crate provides:
//! - Domain types (intensities, exercises, routines)
//! - Exercise catalog
//! - Routine generation (selection + proportional allocation)
//! - Session timer runner and daily streak
//! - Persistence (state store, saved-workout journal)
//! - Share and donation links

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod selection;
pub mod allocation;
pub mod playlist;
pub mod generator;
pub mod streak;
pub mod state;
pub mod journal;
pub mod session;
pub mod share;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::{Config, GeneratorConfig};
pub use generator::{generate, GenerateRequest};
pub use playlist::PlaylistGenre;
pub use state::{CoachState, FileStateStore, MemoryStateStore, StateStore};
pub use journal::{read_saved_workouts, JsonlSink, SavedWorkout, WorkoutSink};
pub use session::{RunState, SessionRunner, TickEvent};
pub use streak::Streak;
