//! Proportional duration allocation with exact-sum correction.
//!
//! Given selected exercises and a target total `T`, every TIME exercise gets
//! `round(T * w_i / W)` seconds, clamped up to a floor. The rounding error
//! `Δ` is then applied to the last TIME exercise. When that would push it
//! below the floor, it stops at the floor and the rest of the deficit is
//! taken one second at a time from the longest remaining exercise (later
//! position wins ties). The result always sums to `T` exactly.
//!
//! REPS exercises keep their nominal value and are outside the sum.

use crate::{ExerciseTemplate, RoutineStep, Unit};

/// Allocate `total_seconds` across the TIME entries of `items`
///
/// If the floor cannot be honoured for every TIME entry
/// (`total_seconds < min_seconds * n`), the effective floor drops to
/// `total_seconds / n`. A zero total weight splits the total evenly.
pub fn allocate(
    items: &[ExerciseTemplate],
    total_seconds: u32,
    min_seconds: u32,
) -> Vec<RoutineStep> {
    let mut steps: Vec<RoutineStep> = items.iter().map(to_step).collect();

    let timed: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, e)| e.unit == Unit::Time)
        .map(|(i, _)| i)
        .collect();

    if timed.is_empty() {
        return steps;
    }

    let total = u64::from(total_seconds);
    let floor = u64::from(min_seconds).min(total / timed.len() as u64);

    let mut weights: Vec<u64> = timed
        .iter()
        .map(|&i| u64::from(items[i].base_duration))
        .collect();
    if weights.iter().all(|&w| w == 0) {
        tracing::debug!("All weights are zero, splitting {}s evenly", total);
        weights.iter_mut().for_each(|w| *w = 1);
    }
    let weight_sum: u64 = weights.iter().sum();

    let mut durations: Vec<u64> = weights
        .iter()
        .map(|&w| round_share(total, w, weight_sum).max(floor))
        .collect();

    correct_to_total(&mut durations, total, floor);

    for (&i, &secs) in timed.iter().zip(&durations) {
        // secs <= total, which came from a u32
        steps[i].duration_or_reps = secs as u32;
    }

    steps
}

fn to_step(template: &ExerciseTemplate) -> RoutineStep {
    RoutineStep {
        name: template.name.clone(),
        slug: template.slug.clone(),
        unit: template.unit,
        duration_or_reps: template.base_duration,
        notes: template.notes.clone().unwrap_or_default(),
    }
}

/// `round(total * weight / weight_sum)`, halves rounded up
fn round_share(total: u64, weight: u64, weight_sum: u64) -> u64 {
    (2 * total * weight + weight_sum) / (2 * weight_sum)
}

fn correct_to_total(durations: &mut [u64], total: u64, floor: u64) {
    let assigned: u64 = durations.iter().sum();
    let Some(last) = durations.len().checked_sub(1) else {
        return;
    };

    if assigned <= total {
        durations[last] += total - assigned;
        if assigned != total {
            tracing::debug!("Added {}s to last exercise", total - assigned);
        }
        return;
    }

    let mut deficit = assigned - total;
    tracing::debug!("Removing {}s rounding surplus", deficit);

    let take = deficit.min(durations[last] - floor);
    durations[last] -= take;
    deficit -= take;

    // floor * n <= total, so enough slack always exists
    while deficit > 0 {
        // max_by_key keeps the last maximum, so later positions win ties
        let Some(longest) = (0..durations.len())
            .filter(|&i| durations[i] > floor)
            .max_by_key(|&i| durations[i])
        else {
            break;
        };
        durations[longest] -= 1;
        deficit -= 1;
    }
}
