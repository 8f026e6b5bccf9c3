//! Saved-workout journal.
//!
//! Saved routines are appended to a JSONL (JSON Lines) file with file
//! locking so the CLI and the server can share one data directory.

use crate::{Result, Routine};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One saved routine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedWorkout {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub routine: Routine,
}

impl SavedWorkout {
    pub fn new(routine: Routine) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            routine,
        }
    }
}

/// Sink for saved workouts
pub trait WorkoutSink {
    fn append(&mut self, workout: &SavedWorkout) -> Result<()>;
}

/// JSONL-based workout sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl WorkoutSink for JsonlSink {
    fn append(&mut self, workout: &SavedWorkout) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(workout)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended workout {} to journal", workout.id);
        Ok(())
    }
}

/// Read all saved workouts, oldest first
///
/// Malformed lines are skipped with a warning.
pub fn read_saved_workouts(path: &Path) -> Result<Vec<SavedWorkout>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut workouts = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<SavedWorkout>(&line) {
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!("Failed to parse workout at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} saved workouts", workouts.len());
    Ok(workouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate, get_default_catalog, GenerateRequest, GeneratorConfig, Intensity};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_workout() -> SavedWorkout {
        let routine = generate(
            get_default_catalog(),
            &GenerateRequest::new(Intensity::Regular),
            &GeneratorConfig::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        SavedWorkout::new(routine)
    }

    #[test]
    fn test_append_and_read_single_workout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.jsonl");

        let workout = sample_workout();
        let mut sink = JsonlSink::new(&path);
        sink.append(&workout).unwrap();

        let workouts = read_saved_workouts(&path).unwrap();
        assert_eq!(workouts, vec![workout]);
    }

    #[test]
    fn test_append_multiple_workouts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/workouts.jsonl");

        let mut sink = JsonlSink::new(&path);
        for _ in 0..3 {
            sink.append(&sample_workout()).unwrap();
        }

        assert_eq!(read_saved_workouts(&path).unwrap().len(), 3);
    }

    #[test]
    fn test_skips_malformed_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.jsonl");

        let mut sink = JsonlSink::new(&path);
        sink.append(&sample_workout()).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{{ truncated").unwrap();
        }
        sink.append(&sample_workout()).unwrap();

        assert_eq!(read_saved_workouts(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_missing_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let workouts = read_saved_workouts(&temp_dir.path().join("none.jsonl")).unwrap();
        assert!(workouts.is_empty());
    }
}
