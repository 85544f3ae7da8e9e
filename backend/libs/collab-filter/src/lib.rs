//! Memory-based collaborative filtering primitives
//!
//! This library provides the pure, in-memory building blocks used by the
//! recommendation service:
//! - **Similarity**: Euclidean-distance and Pearson-correlation scores between two rating maps
//! - **Ranking**: a single top-k selector shared by every ranked output
//! - **Neighbors**: the k entities most similar to a target
//! - **Recommendations**: similarity-weighted average of neighbor ratings for unrated items
//! - **Classifier**: k-nearest-neighbor majority vote over labeled feature vectors
//!
//! Every operation is synchronous and side-effect free. `RatingTable` and
//! `TrainingSet` are plain values; share them across threads by reference.
//!
//! # Example: recommendations for one user
//!
//! ```rust
//! use collab_filter::{get_recommendations, RatingTable, SimilarityMetric};
//!
//! let table: RatingTable = serde_json::from_str(r#"{
//!     "alice": {"dune": 5.0, "heat": 3.0},
//!     "bob":   {"dune": 4.0, "heat": 3.0, "alien": 4.5},
//!     "carol": {"dune": 1.0, "alien": 2.0}
//! }"#).unwrap();
//!
//! let recs = get_recommendations(&table, "alice", 5, SimilarityMetric::Euclidean).unwrap();
//! assert_eq!(recs[0].0, "alien");
//! ```

pub mod classifier;
pub mod error;
pub mod models;
pub mod neighbors;
pub mod ranking;
pub mod recommend;
pub mod similarity;

// Re-export main types for convenience
pub use classifier::{classify, squared_distance, LabeledPoint, TrainingSet};
pub use error::{CollabError, Result};
pub use models::{ItemRatings, RankedPair, RatingTable};
pub use neighbors::{top_matches, top_matches_by};
pub use ranking::top_results;
pub use recommend::{get_recommendations, get_recommendations_by};
pub use similarity::{sim_distance, sim_pearson, similarity, SimilarityMetric};

/// Default number of results returned by `top_matches` and `get_recommendations`
pub const DEFAULT_TOP_K: usize = 5;
