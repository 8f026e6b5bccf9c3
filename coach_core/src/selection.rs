//! Uniform selection of distinct exercises from a pool.

use crate::ExerciseTemplate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick up to `count` distinct exercises from `pool`
///
/// Shuffles a copy of the pool (Fisher-Yates) and keeps a prefix of
/// `min(count, pool.len())`. The returned entries are owned copies, so
/// annotating them never touches the catalog.
pub fn pick_unique<R: Rng + ?Sized>(
    pool: &[ExerciseTemplate],
    count: usize,
    rng: &mut R,
) -> Vec<ExerciseTemplate> {
    let mut picked = pool.to_vec();
    picked.shuffle(rng);
    picked.truncate(count.min(pool.len()));
    tracing::debug!("Picked {} of {} exercises", picked.len(), pool.len());
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{get_default_catalog, Intensity};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_picks_distinct_prefix() {
        let pool = get_default_catalog().pool(Intensity::Regular);
        let mut rng = StdRng::seed_from_u64(7);

        let picked = pick_unique(pool, 5, &mut rng);
        assert_eq!(picked.len(), 5);

        let names: HashSet<_> = picked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), 5);
        assert!(picked.iter().all(|e| pool.contains(e)));
    }

    #[test]
    fn test_count_larger_than_pool() {
        let pool = &get_default_catalog().pool(Intensity::Chill)[..3];
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(pick_unique(pool, 10, &mut rng).len(), 3);
    }

    #[test]
    fn test_empty_pool_yields_empty_selection() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_unique(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_selection() {
        let pool = get_default_catalog().pool(Intensity::Intense);

        let a = pick_unique(pool, 6, &mut StdRng::seed_from_u64(42));
        let b = pick_unique(pool, 6, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_entry_can_be_picked() {
        let pool = get_default_catalog().pool(Intensity::Stretch);
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            for e in pick_unique(pool, 5, &mut rng) {
                seen.insert(e.name);
            }
        }
        assert_eq!(seen.len(), pool.len());
    }
}
