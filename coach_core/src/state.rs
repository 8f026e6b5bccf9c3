//! Persistent user state behind a load/save port.
//!
//! The generator never touches this; the session runner and the front ends
//! receive a `StateStore` explicitly.

use crate::streak::Streak;
use crate::{Error, Intensity, Result, Routine};
use chrono::{DateTime, NaiveDate, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// The last plan a user chose to keep
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedPlan {
    pub routine: Routine,
    pub intensity: Intensity,
    pub playlist: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// User's persistent state across sessions
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CoachState {
    #[serde(default)]
    pub streak: Streak,
    #[serde(default)]
    pub last_plan: Option<SavedPlan>,
}

/// Persistence port for `CoachState`. Last write wins.
pub trait StateStore {
    fn load(&self) -> Result<CoachState>;
    fn save(&self, state: &CoachState) -> Result<()>;

    /// Load state, modify it, and save it back
    fn update<F>(&self, f: F) -> Result<CoachState>
    where
        F: FnOnce(&mut CoachState),
        Self: Sized,
    {
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)?;
        Ok(state)
    }
}

/// Record a completed workout in the streak and return the new count
pub fn record_workout<S: StateStore + ?Sized>(store: &S, today: NaiveDate) -> Result<u32> {
    let mut state = store.load()?;
    let count = state.streak.record(today);
    store.save(&state)?;
    tracing::info!("Streak is now {} day(s)", count);
    Ok(count)
}

/// JSON file store with file locking
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    /// Load state with a shared lock
    ///
    /// Returns default state if the file doesn't exist.
    /// If the file is unreadable or corrupted, logs a warning and returns default state.
    fn load(&self) -> Result<CoachState> {
        let path = &self.path;
        if !path.exists() {
            tracing::info!("No state file found, using default state");
            return Ok(CoachState::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(CoachState::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(CoachState::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(CoachState::default());
        }

        file.unlock()?;

        match serde_json::from_str::<CoachState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded state from {:?}", path);
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(CoachState::default())
            }
        }
    }

    /// Atomically write state: temp file in the same directory, sync, rename
    fn save(&self, state: &CoachState) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::State(format!("State path {:?} has no parent", self.path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;

        // Serialize concurrent writers on the temp file
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(state)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved state to {:?}", self.path);
        Ok(())
    }
}

/// In-process store, used by tests and embedders without a data dir
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: Mutex<CoachState>,
}

impl MemoryStateStore {
    pub fn snapshot(&self) -> CoachState {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<CoachState> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &CoachState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| Error::State("state mutex poisoned".into()))?;
        *guard = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(temp_dir.path().join("state.json"));

        let mut state = CoachState::default();
        state.streak.record(day(3));
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.streak.count, 1);
        assert_eq!(loaded.streak.last, Some(day(3)));
        assert!(loaded.last_plan.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(temp_dir.path().join("nonexistent.json"));

        assert_eq!(store.load().unwrap(), CoachState::default());
    }

    #[test]
    fn test_corrupted_state_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrupted.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let state = FileStateStore::new(&path).load().unwrap();
        assert_eq!(state, CoachState::default());
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(temp_dir.path().join("nested/state.json"));

        store
            .update(|state| {
                state.streak.count = 7;
            })
            .unwrap();

        assert_eq!(store.load().unwrap().streak.count, 7);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(temp_dir.path().join("state.json"));
        store.save(&CoachState::default()).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "state.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only state.json, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_record_workout_through_port() {
        let store = MemoryStateStore::default();

        assert_eq!(record_workout(&store, day(1)).unwrap(), 1);
        assert_eq!(record_workout(&store, day(2)).unwrap(), 2);
        assert_eq!(record_workout(&store, day(2)).unwrap(), 2);
        assert_eq!(store.snapshot().streak.last, Some(day(2)));
    }
}
