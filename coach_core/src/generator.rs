//! Routine generator.
//!
//! Assembles a workout from the catalog:
//! - Optionally pick and allocate a cooldown block against its own budget
//! - Pick distinct exercises from the intensity's pool
//! - Allocate the rest of the total across them
//! - Reshuffle so order is independent of duration
//! - Attach a playlist suggestion

use crate::allocation::allocate;
use crate::config::GeneratorConfig;
use crate::playlist::{self, PlaylistGenre};
use crate::selection::pick_unique;
use crate::types::timed_seconds;
use crate::{Catalog, Error, ExerciseTemplate, Intensity, Result, Routine, RoutineStep};
use rand::seq::SliceRandom;
use rand::Rng;

/// Longest workout a request may ask for
pub const MAX_TOTAL_SECONDS: u32 = 60 * 60;

/// Largest explicit exercise count a request may ask for
pub const MAX_EXERCISE_COUNT: usize = 20;

/// Number of cooldown stretches picked when a cooldown budget is set
pub const COOLDOWN_COUNT: usize = 2;

/// Parameters for one generation request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub intensity: Intensity,
    /// Overrides the configured total length
    pub total_seconds: Option<u32>,
    /// Overrides the intensity's exercise count
    pub exercise_count: Option<usize>,
    pub playlist: Option<PlaylistGenre>,
}

impl GenerateRequest {
    pub fn new(intensity: Intensity) -> Self {
        Self {
            intensity,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(total) = self.total_seconds {
            if total > MAX_TOTAL_SECONDS {
                return Err(Error::Validation(format!(
                    "total_seconds must be at most {}, got {}",
                    MAX_TOTAL_SECONDS, total
                )));
            }
        }
        if let Some(count) = self.exercise_count {
            if count == 0 || count > MAX_EXERCISE_COUNT {
                return Err(Error::Validation(format!(
                    "exercise count must be between 1 and {}, got {}",
                    MAX_EXERCISE_COUNT, count
                )));
            }
        }
        Ok(())
    }
}

/// Generate a routine
///
/// Every call draws from `rng`; seeding it makes the output reproducible.
/// The TIME steps of `main` and `cooldown` together sum to the total
/// exactly. A cooldown budget that does not fit inside the total, or that
/// the cooldown pool cannot fill, is folded back into `main`.
pub fn generate<R: Rng + ?Sized>(
    catalog: &Catalog,
    request: &GenerateRequest,
    settings: &GeneratorConfig,
    rng: &mut R,
) -> Result<Routine> {
    request.validate()?;

    let intensity = request.intensity;
    let total = request.total_seconds.unwrap_or(settings.total_seconds);
    let floor = settings.min_step_seconds;

    let cooldown_total = match settings.cooldown_seconds {
        0 => 0,
        secs if secs >= total => {
            tracing::debug!(
                "Cooldown budget {}s does not fit in {}s, skipping cooldown",
                secs,
                total
            );
            0
        }
        secs if secs < floor => {
            tracing::debug!(
                "Cooldown budget {}s is shorter than one {}s step, skipping cooldown",
                secs,
                floor
            );
            0
        }
        secs => secs,
    };
    let cooldown = if cooldown_total > 0 {
        build_block(&catalog.cooldown, COOLDOWN_COUNT, cooldown_total, floor, rng)
    } else {
        Vec::new()
    };

    // Seconds the cooldown could not hold go back to the main block
    let cooldown_used = timed_seconds(&cooldown);
    if cooldown_used < cooldown_total {
        tracing::debug!(
            "Cooldown used {}s of its {}s budget, returning the rest to the main block",
            cooldown_used,
            cooldown_total
        );
    }
    let main_total = total - cooldown_used;

    let count = request
        .exercise_count
        .unwrap_or_else(|| intensity.selection_count());
    let mut main = build_block(catalog.pool(intensity), count, main_total, floor, rng);

    // Second permutation so long and short steps are not clustered
    main.shuffle(rng);

    tracing::info!(
        "Generated {} routine: {} main steps, {} cooldown steps, {}s total",
        intensity,
        main.len(),
        cooldown.len(),
        total
    );

    Ok(Routine {
        total_duration_seconds: total,
        total_duration_minutes: total.div_ceil(60),
        intensity_label: intensity,
        main,
        cooldown,
        playlist: playlist::suggest(intensity, request.playlist),
    })
}

/// Select and allocate one block
///
/// The count is capped so every step can get at least `floor` seconds, but
/// a positive budget always keeps one step; a zero budget yields an empty
/// block.
fn build_block<R: Rng + ?Sized>(
    pool: &[ExerciseTemplate],
    count: usize,
    total: u32,
    floor: u32,
    rng: &mut R,
) -> Vec<RoutineStep> {
    let count = match total.checked_div(floor) {
        _ if total == 0 => 0,
        Some(fits) => count.min(fits.max(1) as usize),
        None => count,
    };

    if pool.is_empty() {
        tracing::warn!("Exercise pool is empty, block will have no steps");
    }

    let picked = pick_unique(pool, count, rng);
    allocate(&picked, total, floor)
}
