/// User-based collaborative filtering recommendations
///
/// Algorithm:
/// 1. Score every other entity against the target
/// 2. Drop neighbors whose score is not strictly positive
/// 3. For every item the target has not rated (or rated exactly 0.0),
///    accumulate `rating × similarity` and `similarity`
/// 4. Predicted score = weighted sum / similarity total
/// 5. Rank predictions with `top_results`
use crate::error::{CollabError, Result};
use crate::models::{ItemRatings, RankedPair, RatingTable};
use crate::ranking::top_results;
use crate::similarity::SimilarityMetric;
use std::collections::BTreeMap;

/// Running totals for one candidate item
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    weighted_sum: f64,
    similarity_sum: f64,
}

/// Recommend up to `k` items for `target`, best predicted score first.
pub fn get_recommendations(
    table: &RatingTable,
    target: &str,
    k: usize,
    metric: SimilarityMetric,
) -> Result<Vec<RankedPair>> {
    get_recommendations_by(table, target, k, |a, b| metric.score(a, b))
}

/// Same as [`get_recommendations`] with an arbitrary similarity function.
pub fn get_recommendations_by<F>(
    table: &RatingTable,
    target: &str,
    k: usize,
    score: F,
) -> Result<Vec<RankedPair>>
where
    F: Fn(&ItemRatings, &ItemRatings) -> f64,
{
    if k == 0 {
        return Err(CollabError::invalid_argument("k must be > 0"));
    }

    let target_ratings = table.ratings(target)?;
    let mut candidates: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for (other, ratings) in table.iter() {
        if other == target {
            continue;
        }

        let sim = score(target_ratings, ratings);

        // Negative or zero similarity must not pull predictions around
        if sim.is_nan() || sim <= 0.0 {
            continue;
        }

        for (item, &rating) in ratings {
            if !is_unrated(target_ratings, item) {
                continue;
            }

            let acc = candidates.entry(item.as_str()).or_default();
            acc.weighted_sum += rating * sim;
            acc.similarity_sum += sim;
        }
    }

    let predictions: Vec<RankedPair> = candidates
        .into_iter()
        .map(|(item, acc)| (item.to_string(), acc.weighted_sum / acc.similarity_sum))
        .collect();

    Ok(top_results(predictions, k))
}

/// An item is a candidate when the target has no rating or a 0.0 rating
fn is_unrated(ratings: &ItemRatings, item: &str) -> bool {
    match ratings.get(item) {
        None => true,
        Some(&rating) => rating == 0.0,
    }
}
