use crate::error::Result;
use collab_filter::{
    get_recommendations, top_matches, RankedPair, RatingTable, SimilarityMetric,
};
use serde::Serialize;

/// Both similarity scores for one pair of entities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityComparison {
    pub entity_a: String,
    pub entity_b: String,
    pub euclidean: f64,
    pub pearson: f64,
}

impl SimilarityComparison {
    pub fn score(&self, metric: SimilarityMetric) -> f64 {
        match metric {
            SimilarityMetric::Euclidean => self.euclidean,
            SimilarityMetric::Pearson => self.pearson,
        }
    }
}

pub fn compare_entities(
    table: &RatingTable,
    entity_a: &str,
    entity_b: &str,
) -> Result<SimilarityComparison> {
    Ok(SimilarityComparison {
        entity_a: entity_a.to_string(),
        entity_b: entity_b.to_string(),
        euclidean: collab_filter::similarity(
            table,
            entity_a,
            entity_b,
            SimilarityMetric::Euclidean,
        )?,
        pearson: collab_filter::similarity(table, entity_a, entity_b, SimilarityMetric::Pearson)?,
    })
}

/// Nearest neighbors and item recommendations for one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub target: String,
    pub metric: SimilarityMetric,
    pub top_matches: Vec<RankedPair>,
    pub recommendations: Vec<RankedPair>,
}

pub fn build_recommendation_report(
    table: &RatingTable,
    target: &str,
    k: usize,
    metric: SimilarityMetric,
) -> Result<RecommendationReport> {
    Ok(RecommendationReport {
        target: target.to_string(),
        metric,
        top_matches: top_matches(table, target, k, metric)?,
        recommendations: get_recommendations(table, target, k, metric)?,
    })
}
