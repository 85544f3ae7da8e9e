/// Similarity scores between two entities' rating maps
use crate::error::{CollabError, Result};
use crate::models::{ItemRatings, RatingTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity measure used to compare two entities.
///
/// - `Euclidean`: `1 / (1 + distance)` over shared items, in (0, 1]
/// - `Pearson`: correlation coefficient over shared items, in [-1, 1]
///
/// Both return exactly `0.0` when the entities share no item. A zero score
/// sorts last under `Euclidean` but mid-range under `Pearson`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    #[default]
    #[serde(alias = "distance")]
    Euclidean,
    #[serde(alias = "correlation")]
    Pearson,
}

impl SimilarityMetric {
    pub const ALL: [SimilarityMetric; 2] = [SimilarityMetric::Euclidean, SimilarityMetric::Pearson];

    pub fn score(&self, a: &ItemRatings, b: &ItemRatings) -> f64 {
        match self {
            SimilarityMetric::Euclidean => sim_distance(a, b),
            SimilarityMetric::Pearson => sim_pearson(a, b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::Euclidean => "euclidean",
            SimilarityMetric::Pearson => "pearson",
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMetric {
    type Err = CollabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "distance" => Ok(SimilarityMetric::Euclidean),
            "pearson" | "correlation" => Ok(SimilarityMetric::Pearson),
            other => Err(CollabError::invalid_argument(format!(
                "unknown similarity metric '{}', expected euclidean or pearson",
                other
            ))),
        }
    }
}

/// Similarity between two entities of `table`.
///
/// Both entities must exist; a missing id is `UnknownEntity`.
pub fn similarity(
    table: &RatingTable,
    entity_a: &str,
    entity_b: &str,
    metric: SimilarityMetric,
) -> Result<f64> {
    let a = table.ratings(entity_a)?;
    let b = table.ratings(entity_b)?;
    Ok(metric.score(a, b))
}

/// Ratings for every item present in both maps, as (a, b) pairs
fn shared_ratings<'a>(
    a: &'a ItemRatings,
    b: &'a ItemRatings,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    a.iter()
        .filter_map(move |(item, &ra)| b.get(item).map(|&rb| (ra, rb)))
}

/// Euclidean-distance similarity: `1 / (1 + sqrt(Σ (a_i - b_i)²))`.
///
/// Returns `0.0` when nothing is shared.
pub fn sim_distance(a: &ItemRatings, b: &ItemRatings) -> f64 {
    let mut shared = 0usize;
    let mut sum_of_squares = 0.0;

    for (ra, rb) in shared_ratings(a, b) {
        shared += 1;
        sum_of_squares += (ra - rb).powi(2);
    }

    if shared == 0 {
        return 0.0;
    }

    1.0 / (1.0 + sum_of_squares.sqrt())
}

/// Pearson correlation over shared items, clamped to [-1, 1].
///
/// Returns `0.0` when nothing is shared or when either side's shared ratings
/// are constant.
pub fn sim_pearson(a: &ItemRatings, b: &ItemRatings) -> f64 {
    let shared: Vec<(f64, f64)> = shared_ratings(a, b).collect();

    let (first_a, first_b) = match shared.first() {
        Some(&pair) => pair,
        None => return 0.0,
    };

    // Compared exactly: rounding in the variance sums leaves a non-zero
    // residue for constant non-integer ratings
    if shared.iter().all(|&(ra, _)| ra == first_a) || shared.iter().all(|&(_, rb)| rb == first_b) {
        return 0.0;
    }

    let n = shared.len() as f64;
    let mean_a = shared.iter().map(|&(ra, _)| ra).sum::<f64>() / n;
    let mean_b = shared.iter().map(|&(_, rb)| rb).sum::<f64>() / n;

    let (mut covariance, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for &(ra, rb) in &shared {
        let (da, db) = (ra - mean_a, rb - mean_b);
        covariance += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denominator = (var_a * var_b).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (covariance / denominator).clamp(-1.0, 1.0)
}
