//! Integration tests for the mcoach binary.
//!
//! These tests verify end-to-end behavior including:
//! - Routine generation and its exact-sum guarantee
//! - Saving routines and reloading the last plan
//! - Running the session timer and updating the streak

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mcoach"))
}

fn generate_json(args: &[&str]) -> Value {
    let output = cli()
        .arg("generate")
        .arg("--json")
        .args(args)
        .output()
        .expect("Failed to run mcoach");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn timed_sum(steps: &Value) -> u64 {
    steps
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["unit"] == "time")
        .map(|s| s["duration_or_reps"].as_u64().unwrap())
        .sum()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Five-minute micro workout generator"));
}

#[test]
fn test_generate_json_sums_to_total() {
    for intensity in ["chill", "stretch", "regular", "intense", "hardcore"] {
        let routine = generate_json(&["--intensity", intensity, "--seed", "17"]);

        assert_eq!(routine["intensity_label"], intensity);
        assert_eq!(routine["total_duration_minutes"], 5);
        assert_eq!(timed_sum(&routine["main"]), 300);
    }
}

#[test]
fn test_generate_is_reproducible_with_seed() {
    let a = generate_json(&["--intensity", "intense", "--seed", "5"]);
    let b = generate_json(&["--intensity", "intense", "--seed", "5"]);
    assert_eq!(a, b);
}

#[test]
fn test_generate_custom_length_and_count() {
    let routine = generate_json(&["--seconds", "240", "--count", "4", "--seed", "1"]);

    assert_eq!(routine["main"].as_array().unwrap().len(), 4);
    assert_eq!(timed_sum(&routine["main"]), 240);
}

#[test]
fn test_generate_with_playlist() {
    let routine = generate_json(&["--playlist", "lofi", "--seed", "1"]);
    assert_eq!(routine["playlist"][0]["title"], "Lofi 5-min");
}

#[test]
fn test_unknown_intensity_fails() {
    cli()
        .arg("generate")
        .arg("--intensity")
        .arg("extreme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnknownIntensity"));
}

#[test]
fn test_default_command_prints_routine() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("REGULAR WORKOUT"));
}

#[test]
fn test_save_writes_state_and_journal() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("generate")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout saved"));

    let state = fs::read_to_string(data_dir.join("state.json")).expect("Failed to read state");
    assert!(state.contains("last_plan"));

    let journal =
        fs::read_to_string(data_dir.join("workouts.jsonl")).expect("Failed to read journal");
    assert_eq!(journal.lines().count(), 1);

    cli()
        .arg("saved")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 saved workout(s)"));
}

#[test]
fn test_run_fast_completes_and_starts_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("run")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--fast")
        .arg("--intensity")
        .arg("chill")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout complete"))
        .stdout(predicate::str::contains("Streak: 1 day(s)"));

    cli()
        .arg("streak")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 1 day(s)"));
}

#[test]
fn test_second_run_same_day_keeps_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for _ in 0..2 {
        cli()
            .arg("run")
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--fast")
            .assert()
            .success()
            .stdout(predicate::str::contains("Streak: 1 day(s)"));
    }
}

#[test]
fn test_run_last_plan() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("generate")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--intensity")
        .arg("stretch")
        .arg("--save")
        .assert()
        .success();

    cli()
        .arg("run")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--last")
        .arg("--fast")
        .assert()
        .success()
        .stdout(predicate::str::contains("STRETCH WORKOUT"))
        .stdout(predicate::str::contains("Workout complete"));
}

#[test]
fn test_run_last_without_saved_plan_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("run")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--last")
        .arg("--fast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No saved plan"));
}

#[test]
fn test_streak_without_history() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("streak")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 0 day(s)"));
}
