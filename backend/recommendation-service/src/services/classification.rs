use crate::error::Result;
use collab_filter::{classify, TrainingSet};
use serde::Serialize;
use tracing::debug;

/// Outcome of classifying one query vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRun {
    pub query: Vec<f64>,
    pub k: usize,
    pub training_size: usize,
    pub label: String,
}

pub fn run_classification(
    training: &TrainingSet<String>,
    query: &[f64],
    k: usize,
) -> Result<ClassificationRun> {
    let label = classify(query, training, k)?;

    debug!(k, training_size = training.len(), label = %label, "Classified query");

    Ok(ClassificationRun {
        query: query.to_vec(),
        k,
        training_size: training.len(),
        label,
    })
}
