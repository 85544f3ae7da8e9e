/// k-nearest-neighbor classification over labeled feature vectors
use crate::error::{CollabError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One training example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint<L> {
    pub features: Vec<f64>,
    pub label: L,
}

impl<L> LabeledPoint<L> {
    pub fn new(features: impl Into<Vec<f64>>, label: L) -> Self {
        Self {
            features: features.into(),
            label,
        }
    }
}

/// Non-empty set of labeled points sharing one dimensionality.
///
/// Read-only once built; safe to share across threads by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet<L> {
    points: Vec<LabeledPoint<L>>,
    dimension: usize,
}

impl<L> TrainingSet<L> {
    /// Validate and wrap `points`.
    ///
    /// Fails when `points` is empty, when the first vector has no features,
    /// or when any vector's length differs from the first one.
    pub fn new(points: Vec<LabeledPoint<L>>) -> Result<Self> {
        let dimension = match points.first() {
            Some(point) => point.features.len(),
            None => {
                return Err(CollabError::invalid_argument(
                    "training set must not be empty",
                ))
            }
        };

        if dimension == 0 {
            return Err(CollabError::invalid_argument(
                "feature vectors must have at least one dimension",
            ));
        }

        if let Some(point) = points.iter().find(|p| p.features.len() != dimension) {
            return Err(CollabError::DimensionMismatch {
                expected: dimension,
                actual: point.features.len(),
            });
        }

        Ok(Self { points, dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LabeledPoint<L>] {
        &self.points
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.points.iter().map(|p| &p.label)
    }
}

impl<L> TryFrom<Vec<(Vec<f64>, L)>> for TrainingSet<L> {
    type Error = CollabError;

    fn try_from(pairs: Vec<(Vec<f64>, L)>) -> Result<Self> {
        let points = pairs
            .into_iter()
            .map(|(features, label)| LabeledPoint::new(features, label))
            .collect();
        TrainingSet::new(points)
    }
}

/// Squared Euclidean distance. Same ordering as the true distance.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Majority label among the `k` training points closest to `query`.
///
/// Equal distances keep training-set order. When several labels share the
/// highest vote count, the smallest label (by `Ord`) wins.
///
/// Errors: `k == 0`, `k > training.len()`, or a query whose length differs
/// from the training dimensionality.
pub fn classify<L>(query: &[f64], training: &TrainingSet<L>, k: usize) -> Result<L>
where
    L: Ord + Clone,
{
    if k == 0 {
        return Err(CollabError::invalid_argument("k must be > 0"));
    }

    if k > training.len() {
        return Err(CollabError::invalid_argument(format!(
            "k ({}) exceeds training set size ({})",
            k,
            training.len()
        )));
    }

    if query.len() != training.dimension() {
        return Err(CollabError::DimensionMismatch {
            expected: training.dimension(),
            actual: query.len(),
        });
    }

    let mut distances: Vec<(f64, usize)> = training
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| (squared_distance(query, &point.features), i))
        .collect();

    distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut votes: BTreeMap<&L, usize> = BTreeMap::new();
    for &(_, idx) in distances.iter().take(k) {
        *votes.entry(&training.points[idx].label).or_insert(0) += 1;
    }

    // BTreeMap iterates labels ascending; only a strictly higher count replaces
    let mut winner: Option<(&L, usize)> = None;
    for (label, count) in votes {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((label, count)),
        }
    }

    winner
        .map(|(label, _)| label.clone())
        .ok_or_else(|| CollabError::invalid_argument("no neighbors selected"))
}
