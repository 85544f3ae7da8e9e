use crate::error::{AppError, Result};
use collab_filter::{CollabError, RatingTable};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

/// Seeded RNG when `seed` is set, OS entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Choose `count` distinct entity ids uniformly at random
pub fn sample_entities<R: Rng + ?Sized>(
    table: &RatingTable,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    let ids: Vec<&str> = table.entities().collect();

    if count > ids.len() {
        return Err(AppError::NotEnoughEntities {
            needed: count,
            found: ids.len(),
        });
    }

    Ok(index::sample(rng, ids.len(), count)
        .into_iter()
        .map(|i| ids[i].to_string())
        .collect())
}

/// Pick the pair to compare: `target` (when given) plus a random other
/// entity, or two random entities.
pub fn pick_pair<R: Rng + ?Sized>(
    table: &RatingTable,
    target: Option<&str>,
    rng: &mut R,
) -> Result<(String, String)> {
    if table.len() < 2 {
        return Err(AppError::NotEnoughEntities {
            needed: 2,
            found: table.len(),
        });
    }

    match target {
        Some(target) => {
            if !table.contains(target) {
                return Err(CollabError::UnknownEntity(target.to_string()).into());
            }

            let others: Vec<&str> = table.entities().filter(|id| *id != target).collect();
            let other = others.choose(rng).ok_or(AppError::NotEnoughEntities {
                needed: 2,
                found: table.len(),
            })?;

            Ok((target.to_string(), other.to_string()))
        }
        None => {
            let mut pair = sample_entities(table, 2, rng)?.into_iter();
            match (pair.next(), pair.next()) {
                (Some(a), Some(b)) => Ok((a, b)),
                _ => Err(AppError::NotEnoughEntities {
                    needed: 2,
                    found: table.len(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RatingTable {
        vec![("A", "x", 1.0), ("B", "x", 2.0), ("C", "y", 3.0), ("D", "z", 4.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_sample_entities_distinct() {
        let mut rng = rng_from_seed(Some(7));
        let sampled = sample_entities(&table(), 3, &mut rng).unwrap();

        assert_eq!(sampled.len(), 3);
        let mut unique = sampled.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
        assert!(sampled.iter().all(|id| table().contains(id)));
    }

    #[test]
    fn test_sample_entities_seed_is_reproducible() {
        let first = sample_entities(&table(), 2, &mut rng_from_seed(Some(42))).unwrap();
        let second = sample_entities(&table(), 2, &mut rng_from_seed(Some(42))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_too_many() {
        let err = sample_entities(&table(), 5, &mut rng_from_seed(Some(1))).unwrap_err();
        assert!(matches!(
            err,
            AppError::NotEnoughEntities {
                needed: 5,
                found: 4
            }
        ));
    }

    #[test]
    fn test_pick_pair_with_target() {
        let mut rng = rng_from_seed(Some(3));
        for _ in 0..20 {
            let (a, b) = pick_pair(&table(), Some("C"), &mut rng).unwrap();
            assert_eq!(a, "C");
            assert_ne!(b, "C");
        }
    }

    #[test]
    fn test_pick_pair_random() {
        let mut rng = rng_from_seed(Some(11));
        let (a, b) = pick_pair(&table(), None, &mut rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pick_pair_errors() {
        let mut rng = rng_from_seed(Some(5));

        let err = pick_pair(&table(), Some("Z"), &mut rng).unwrap_err();
        assert!(matches!(err, AppError::Core(CollabError::UnknownEntity(_))));

        let single: RatingTable = vec![("A", "x", 1.0)].into_iter().collect();
        let err = pick_pair(&single, None, &mut rng).unwrap_err();
        assert!(matches!(err, AppError::NotEnoughEntities { .. }));
    }
}
