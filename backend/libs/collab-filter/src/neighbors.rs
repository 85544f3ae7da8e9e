use crate::error::{CollabError, Result};
use crate::models::{ItemRatings, RankedPair, RatingTable};
use crate::ranking::top_results;
use crate::similarity::SimilarityMetric;

/// The `k` entities most similar to `target`, best first.
///
/// `target` itself is never part of the result. Scores are recomputed on
/// every call.
pub fn top_matches(
    table: &RatingTable,
    target: &str,
    k: usize,
    metric: SimilarityMetric,
) -> Result<Vec<RankedPair>> {
    top_matches_by(table, target, k, |a, b| metric.score(a, b))
}

/// Same as [`top_matches`] with an arbitrary similarity function.
pub fn top_matches_by<F>(
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

    let scored: Vec<RankedPair> = table
        .iter()
        .filter(|(other, _)| *other != target)
        .map(|(other, ratings)| (other.to_string(), score(target_ratings, ratings)))
        .collect();

    Ok(top_results(scored, k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RatingTable {
        vec![
            ("A", "x", 5.0),
            ("A", "y", 3.0),
            ("B", "x", 4.0),
            ("B", "y", 4.0),
            ("C", "x", 1.0),
            ("C", "y", 1.0),
            ("D", "z", 2.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_top_matches_excludes_target() {
        let matches = top_matches(&table(), "A", 5, SimilarityMetric::Euclidean).unwrap();

        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|(id, _)| id != "A"));
        assert_eq!(matches[0].0, "B");
        assert_eq!(matches[1].0, "C");
        // No overlap with D
        assert_eq!(matches[2], ("D".to_string(), 0.0));
    }

    #[test]
    fn test_top_matches_truncates() {
        let matches = top_matches(&table(), "A", 1, SimilarityMetric::Euclidean).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, "B");
    }

    #[test]
    fn test_top_matches_errors() {
        let err = top_matches(&table(), "nobody", 3, SimilarityMetric::Pearson).unwrap_err();
        assert_eq!(err, CollabError::UnknownEntity("nobody".to_string()));

        let err = top_matches(&table(), "A", 0, SimilarityMetric::Pearson).unwrap_err();
        assert!(matches!(err, CollabError::InvalidArgument(_)));
    }

    #[test]
    fn test_top_matches_by_custom_score() {
        // Rank by number of shared items
        let shared = |a: &ItemRatings, b: &ItemRatings| {
            a.keys().filter(|item| b.contains_key(*item)).count() as f64
        };

        let matches = top_matches_by(&table(), "A", 2, shared).unwrap();
        assert_eq!(matches, vec![("B".to_string(), 2.0), ("C".to_string(), 2.0)]);
    }

    #[test]
    fn test_single_entity_table() {
        let table: RatingTable = vec![("solo", "x", 1.0)].into_iter().collect();
        let matches = top_matches(&table, "solo", 5, SimilarityMetric::Euclidean).unwrap();
        assert!(matches.is_empty());
    }
}
