//! Default exercise catalog.
//!
//! Five intensity pools of twenty timed exercises each, plus a shared
//! cooldown pool. The catalog is built once and shared read-only; the
//! generator copies entries before annotating them.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Cached default catalog - built once and reused across all requests
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for tests that need to alter pools.
pub fn build_default_catalog() -> Catalog {
    let mut pools = HashMap::new();
    pools.insert(Intensity::Chill, chill_pool());
    pools.insert(Intensity::Stretch, stretch_pool());
    pools.insert(Intensity::Regular, regular_pool());
    pools.insert(Intensity::Intense, intense_pool());
    pools.insert(Intensity::Hardcore, hardcore_pool());

    Catalog {
        pools,
        cooldown: cooldown_pool(),
    }
}

fn chill_pool() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate::timed("Neck rolls", 20, "neck-rolls"),
        ExerciseTemplate::timed("Shoulder shrugs", 20, "shoulder-shrugs"),
        ExerciseTemplate::timed("Ankle circles", 18, "ankle-circles"),
        ExerciseTemplate::timed("Wrist circles", 15, "wrist-circles"),
        ExerciseTemplate::timed("Seated cat-cow", 30, "seated-cat-cow"),
        ExerciseTemplate::timed("Child's pose", 40, "childs-pose"),
        ExerciseTemplate::timed("Seated forward fold", 30, "seated-forward-fold"),
        ExerciseTemplate::timed("Calf stretch", 25, "calf-stretch"),
        ExerciseTemplate::timed("Hip circles", 20, "hip-circles"),
        ExerciseTemplate::timed("Knee hugs", 20, "knee-hugs"),
        ExerciseTemplate::timed("Supine knee rock", 20, "supine-knee-rock"),
        ExerciseTemplate::timed("Hamstring pedal (gentle)", 20, "hamstring-pedal"),
        ExerciseTemplate::timed("Seated shoulder stretch", 18, "seated-shoulder-stretch"),
        ExerciseTemplate::timed("Thoracic rotation (seated)", 22, "thoracic-rotation"),
        ExerciseTemplate::timed("Ankle dorsiflexor mobility", 18, "ankle-dorsiflexor-mobility"),
        ExerciseTemplate::timed("Breathing focus", 30, "breathing-focus"),
        ExerciseTemplate::timed("Seated side bend", 22, "seated-side-bend"),
        ExerciseTemplate::timed("Gentle torso twist", 20, "gentle-torso-twist"),
        ExerciseTemplate::timed("Neck side stretch", 18, "neck-side-stretch"),
        ExerciseTemplate::timed("Wrist flexor stretch", 15, "wrist-flexor-stretch"),
    ]
}

fn stretch_pool() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate::timed("Hamstring stretch", 40, "hamstring-stretch"),
        ExerciseTemplate::timed("Quad stretch", 40, "quad-stretch"),
        ExerciseTemplate::timed("Butterfly stretch", 35, "butterfly-stretch"),
        ExerciseTemplate::timed("Pigeon prep", 35, "pigeon-prep"),
        ExerciseTemplate::timed("Glute stretch", 30, "glute-stretch"),
        ExerciseTemplate::timed("Adductor stretch", 30, "adductor-stretch"),
        ExerciseTemplate::timed("Lying quad release", 30, "lying-quad-release"),
        ExerciseTemplate::timed("Torso twist", 30, "torso-twist"),
        ExerciseTemplate::timed("Chest opener", 25, "chest-opener"),
        ExerciseTemplate::timed("Triceps stretch", 20, "triceps-stretch"),
        ExerciseTemplate::timed("Seated spinal twist", 30, "seated-spinal-twist"),
        ExerciseTemplate::timed("Standing calf stretch", 25, "standing-calf-stretch"),
        ExerciseTemplate::timed("Hamstring hold", 30, "hamstring-hold"),
        ExerciseTemplate::timed("World's greatest stretch", 40, "worlds-greatest-stretch"),
        ExerciseTemplate::timed("IT band lean", 25, "it-band-lean"),
        ExerciseTemplate::timed("Hip opener (kneeling)", 30, "hip-opener-kneeling"),
        ExerciseTemplate::timed("Figure-4 lying", 30, "figure4-lying"),
        ExerciseTemplate::timed("Shoulder cross-body", 20, "shoulder-cross-body"),
        ExerciseTemplate::timed("Neck mobility hold", 18, "neck-mobility-hold"),
        ExerciseTemplate::timed("Wrist mobility stretch", 15, "wrist-mobility-stretch"),
    ]
}

fn regular_pool() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate::timed("Bodyweight squats", 30, "bodyweight-squats"),
        ExerciseTemplate::timed("Incline push-ups", 28, "incline-push-ups"),
        ExerciseTemplate::timed("Alternating lunges", 30, "alternating-lunges"),
        ExerciseTemplate::timed("Plank (forearms)", 40, "plank-forearms"),
        ExerciseTemplate::timed("Glute bridge", 30, "glute-bridge"),
        ExerciseTemplate::timed("Standing knee lifts", 25, "standing-knee-lifts"),
        ExerciseTemplate::timed("Calf raises", 25, "calf-raises"),
        ExerciseTemplate::timed("Side lunges", 28, "side-lunges"),
        ExerciseTemplate::timed("Supermans", 24, "supermans"),
        ExerciseTemplate::timed("Reverse lunges", 28, "reverse-lunges"),
        ExerciseTemplate::timed("Bird-dog", 24, "bird-dog"),
        ExerciseTemplate::timed("Step ups (low)", 28, "step-ups-low"),
        ExerciseTemplate::timed("Tricep dips (chair)", 26, "tricep-dips-chair"),
        ExerciseTemplate::timed("Heel taps", 24, "heel-taps"),
        ExerciseTemplate::timed("Hip bridges with march", 26, "hip-bridges-march"),
        ExerciseTemplate::timed("Standing oblique crunch", 24, "standing-oblique-crunch"),
        ExerciseTemplate::timed("Wall sits", 30, "wall-sits"),
        ExerciseTemplate::timed("Tabletop leg lifts", 24, "tabletop-leg-lifts"),
        ExerciseTemplate::timed("Reverse fly (bodyweight)", 22, "reverse-fly-bodyweight"),
        ExerciseTemplate::timed("Deadbug core", 24, "deadbug-core"),
    ]
}

fn intense_pool() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate::timed("Mountain climbers", 28, "mountain-climbers"),
        ExerciseTemplate::timed("Jump squats (modified)", 26, "jump-squats-modified"),
        ExerciseTemplate::timed("Plank shoulder taps", 26, "plank-shoulder-taps"),
        ExerciseTemplate::timed("High knees", 30, "high-knees"),
        ExerciseTemplate::timed("Burpees (half)", 28, "burpees-half"),
        ExerciseTemplate::timed("Speed skaters", 26, "speed-skaters"),
        ExerciseTemplate::timed("Fast alternating lunges", 26, "fast-alternating-lunges"),
        ExerciseTemplate::timed("Bicycle crunches", 28, "bicycle-crunches"),
        ExerciseTemplate::timed("Tuck jump (low)", 22, "tuck-jump-low"),
        ExerciseTemplate::timed("Plank jacks (low)", 26, "plank-jacks-low"),
        ExerciseTemplate::timed("Skips without rope", 24, "skips-without-rope"),
        ExerciseTemplate::timed("Explosive push-up (knee mod)", 22, "explosive-pushup-knee"),
        ExerciseTemplate::timed("Alternating jump lunges", 26, "alternating-jump-lunges"),
        ExerciseTemplate::timed("Fast squat pulses", 24, "fast-squat-pulses"),
        ExerciseTemplate::timed("Russian twists (fast)", 26, "russian-twists-fast"),
        ExerciseTemplate::timed("Mountain climber hold", 28, "mountain-climber-hold"),
        ExerciseTemplate::timed("Climber bursts", 26, "climber-bursts"),
        ExerciseTemplate::timed("Star jumps (low)", 22, "star-jumps-low"),
        ExerciseTemplate::timed("Heel flicks", 24, "heel-flicks"),
        ExerciseTemplate::timed("Explosive step-ups", 24, "explosive-step-ups"),
    ]
}

fn hardcore_pool() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate::timed("Burpees (modified)", 30, "burpees-modified"),
        ExerciseTemplate::timed("Plyo lunges", 28, "plyo-lunges"),
        ExerciseTemplate::timed("Pistol squat (assisted)", 30, "pistol-squat-assisted"),
        ExerciseTemplate::timed("Tuck jumps", 26, "tuck-jumps"),
        ExerciseTemplate::timed("Explosive mountain climbers", 28, "explosive-mountain-climbers"),
        ExerciseTemplate::timed("One-leg hip thrust", 28, "one-leg-hip-thrust"),
        ExerciseTemplate::timed("Clap push-ups (mod)", 26, "clap-pushups-mod"),
        ExerciseTemplate::timed("Single-leg plyo hops", 26, "single-leg-plyo-hops"),
        ExerciseTemplate::timed("Sprint-in-place", 30, "sprint-in-place"),
        ExerciseTemplate::timed("L-sit hold (mod)", 24, "l-sit-hold-mod"),
        ExerciseTemplate::timed("Aztec push-ups (mod)", 24, "aztec-pushups-mod"),
        ExerciseTemplate::timed("All-out squat jumps", 26, "all-out-squat-jumps"),
        ExerciseTemplate::timed("Explosive plank taps", 24, "explosive-plank-taps"),
        ExerciseTemplate::timed("Plyo push-up (mod)", 24, "plyo-pushup-mod"),
        ExerciseTemplate::timed("Box jump substitute", 24, "box-jump-substitute"),
        ExerciseTemplate::timed("Weighted-ish squat pulses", 26, "weightedish-squat-pulses"),
        ExerciseTemplate::timed("Heavy core rotations", 26, "heavy-core-rotations"),
        ExerciseTemplate::timed("Burpee tuck", 26, "burpee-tuck"),
        ExerciseTemplate::timed("One-arm plank (mod)", 24, "one-arm-plank-mod"),
        ExerciseTemplate::timed("Aztec hold (mod)", 22, "aztec-hold-mod"),
    ]
}

fn cooldown_pool() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate::timed("Deep breaths", 20, "deep-breaths")
            .with_notes("In through the nose, out through the mouth"),
        ExerciseTemplate::timed("Standing side bend", 20, "standing-side-bend"),
        ExerciseTemplate::timed("Child's pose", 30, "childs-pose"),
        ExerciseTemplate::timed("Forward fold", 25, "forward-fold")
            .with_notes("Soft knees"),
        ExerciseTemplate::timed("Quad stretch", 20, "quad-stretch")
            .with_notes("Switch legs halfway"),
        ExerciseTemplate::timed("Chest opener", 20, "chest-opener"),
        ExerciseTemplate::timed("Neck side stretch", 15, "neck-side-stretch"),
        ExerciseTemplate::timed("Calf stretch", 20, "calf-stretch"),
    ]
}

impl Catalog {
    /// Candidate exercises for an intensity, in catalog order
    ///
    /// A pool missing from the map is treated as empty.
    pub fn pool(&self, intensity: Intensity) -> &[ExerciseTemplate] {
        self.pools
            .get(&intensity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for intensity in Intensity::ALL {
            match self.pools.get(&intensity) {
                Some(pool) => validate_pool(intensity.as_str(), pool, &mut errors),
                None => errors.push(format!("Catalog has no '{}' pool", intensity)),
            }
        }

        validate_pool("cooldown", &self.cooldown, &mut errors);
        errors
    }
}

fn validate_pool(label: &str, pool: &[ExerciseTemplate], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();

    for exercise in pool {
        if exercise.name.is_empty() {
            errors.push(format!("Pool '{}' has an exercise with empty name", label));
            continue;
        }
        if !seen.insert(exercise.name.as_str()) {
            errors.push(format!(
                "Pool '{}' has duplicate exercise '{}'",
                label, exercise.name
            ));
        }
        if exercise.slug.is_empty() {
            errors.push(format!(
                "Pool '{}': exercise '{}' has empty slug",
                label, exercise.name
            ));
        }
        if exercise.unit == Unit::Reps && exercise.base_duration == 0 {
            errors.push(format!(
                "Pool '{}': rep exercise '{}' has zero reps",
                label, exercise.name
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.pools.len(), 5);
        for intensity in Intensity::ALL {
            assert_eq!(catalog.pool(intensity).len(), 20, "pool {}", intensity);
        }
        assert!(!catalog.cooldown.is_empty());
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_pools_cover_selection_counts() {
        let catalog = get_default_catalog();
        for intensity in Intensity::ALL {
            assert!(catalog.pool(intensity).len() >= intensity.selection_count());
        }
    }

    #[test]
    fn test_duplicate_names_reported() {
        let mut catalog = build_default_catalog();
        let first = catalog.pool(Intensity::Chill)[0].clone();
        catalog
            .pools
            .get_mut(&Intensity::Chill)
            .unwrap()
            .push(first);

        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("duplicate"));
    }

    #[test]
    fn test_missing_pool_is_empty_and_reported() {
        let mut catalog = build_default_catalog();
        catalog.pools.remove(&Intensity::Stretch);

        assert!(catalog.pool(Intensity::Stretch).is_empty());
        assert!(catalog
            .validate()
            .iter()
            .any(|e| e.contains("no 'stretch' pool")));
    }
}
