//! Recommendation runner
//!
//! Wires the collaborative filtering core to loaded data:
//! 1. Pick an entity pair (configured target or random sample)
//! 2. Compare the pair under both metrics, on the standard and normalized tables
//! 3. Rank neighbors and recommend items for the target
//! 4. Classify the configured query vector

pub mod classification;
pub mod report;
pub mod sampling;

pub use classification::{run_classification, ClassificationRun};
pub use report::{
    build_recommendation_report, compare_entities, RecommendationReport, SimilarityComparison,
};
pub use sampling::{pick_pair, rng_from_seed, sample_entities};

use crate::config::Config;
use crate::error::Result;
use crate::loader;
use collab_filter::{RatingTable, SimilarityMetric, TrainingSet};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Everything produced by one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub standard: SimilarityComparison,
    pub normalized: Option<SimilarityComparison>,
    pub recommendations: RecommendationReport,
    pub classification: ClassificationRun,
}

/// Load everything named by `config` and build the report
pub fn run(config: &Config) -> Result<RunReport> {
    let table = loader::load_ratings(&config.ratings_path)?;

    let normalized = match &config.normalized_ratings_path {
        Some(path) => Some(loader::load_ratings(path)?),
        None => None,
    };

    let training = match &config.training_path {
        Some(path) => loader::load_training_set(path)?,
        None => loader::sample_training_set()?,
    };

    let mut rng = rng_from_seed(config.seed);
    run_with(config, &table, normalized.as_ref(), &training, &mut rng)
}

/// Build the report from already-loaded data
pub fn run_with<R: Rng + ?Sized>(
    config: &Config,
    table: &RatingTable,
    normalized: Option<&RatingTable>,
    training: &TrainingSet<String>,
    rng: &mut R,
) -> Result<RunReport> {
    let (entity_a, entity_b) = pick_pair(table, config.target.as_deref(), rng)?;

    info!(
        entity_a = %entity_a,
        entity_b = %entity_b,
        entities = table.len(),
        "Comparing entities"
    );

    let standard = compare_entities(table, &entity_a, &entity_b)?;
    let normalized = match normalized {
        Some(normalized) => Some(compare_entities(normalized, &entity_a, &entity_b)?),
        None => None,
    };

    let recommendations =
        build_recommendation_report(table, &entity_a, config.top_k, config.metric)?;

    info!(
        target = %entity_a,
        metric = %config.metric,
        matches = recommendations.top_matches.len(),
        recommendations = recommendations.recommendations.len(),
        "Built recommendations"
    );

    let classification = run_classification(training, &config.query, config.classify_k)?;

    Ok(RunReport {
        standard,
        normalized,
        recommendations,
        classification,
    })
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Comparing {} and {}",
            self.standard.entity_a, self.standard.entity_b
        )?;

        for (title, metric) in [
            ("Euclidean distance", SimilarityMetric::Euclidean),
            ("Pearson correlation", SimilarityMetric::Pearson),
        ] {
            writeln!(f)?;
            writeln!(f, "{}", title)?;
            writeln!(f, "\tstandard: {:.10}", self.standard.score(metric))?;
            if let Some(normalized) = &self.normalized {
                writeln!(f, "\tnormalized: {:.10}", normalized.score(metric))?;
            }
        }

        let recs = &self.recommendations;
        writeln!(f)?;
        writeln!(f, "Top matches for {} ({})", recs.target, recs.metric)?;
        for (entity, score) in &recs.top_matches {
            writeln!(f, "\t{:.10}\t{}", score, entity)?;
        }

        writeln!(f)?;
        writeln!(f, "Recommendations for {} ({})", recs.target, recs.metric)?;
        if recs.recommendations.is_empty() {
            writeln!(f, "\t(none)")?;
        }
        for (item, score) in &recs.recommendations {
            writeln!(f, "\t{:.10}\t{}", score, item)?;
        }

        let run = &self.classification;
        writeln!(f)?;
        write!(
            f,
            "Classified {:?} as {} (k={}, training records={})",
            run.query, run.label, run.k, run.training_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        Config::from_vars(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    fn table() -> RatingTable {
        vec![
            ("A", "x", 5.0),
            ("A", "y", 3.0),
            ("B", "x", 4.0),
            ("B", "y", 4.0),
            ("B", "z", 2.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_run_with_target() {
        let config = config(&[("RECOMMENDER_TARGET", "A")]);
        let training = loader::sample_training_set().unwrap();
        let mut rng = rng_from_seed(Some(1));

        let report = run_with(&config, &table(), None, &training, &mut rng).unwrap();

        assert_eq!(report.standard.entity_a, "A");
        assert_eq!(report.standard.entity_b, "B");
        assert!(report.normalized.is_none());
        assert_eq!(report.recommendations.recommendations[0].0, "z");
        assert_eq!(report.classification.label, "B");
    }

    #[test]
    fn test_display_layout() {
        let config = config(&[("RECOMMENDER_TARGET", "A")]);
        let training = loader::sample_training_set().unwrap();
        let normalized = table();
        let mut rng = rng_from_seed(Some(1));

        let report = run_with(&config, &table(), Some(&normalized), &training, &mut rng).unwrap();
        let text = report.to_string();

        assert!(text.starts_with("Comparing A and B\n"));
        assert!(text.contains("Euclidean distance\n\tstandard: 0.4142135624\n\tnormalized: 0.4142135624"));
        assert!(text.contains("Pearson correlation\n\tstandard: 0.0000000000"));
        assert!(text.contains("Recommendations for A (euclidean)\n\t2.0000000000\tz"));
        assert!(text.ends_with("as B (k=3, training records=4)"));
    }
}
