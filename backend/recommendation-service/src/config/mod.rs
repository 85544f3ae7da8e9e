use crate::error::{AppError, Result};
use collab_filter::{SimilarityMetric, DEFAULT_TOP_K};
use serde::Deserialize;
use std::path::PathBuf;

/// Prefix shared by every environment variable read into [`Config`]
pub const ENV_PREFIX: &str = "RECOMMENDER_";

/// Runner configuration loaded from `RECOMMENDER_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// JSON rating table (entity -> item -> rating)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Optional second table with the same entities, compared alongside
    #[serde(default)]
    pub normalized_ratings_path: Option<PathBuf>,

    /// Whitespace-delimited training records; the built-in sample set when unset
    #[serde(default)]
    pub training_path: Option<PathBuf>,

    #[serde(default)]
    pub metric: SimilarityMetric,

    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Target entity; sampled at random when unset
    #[serde(default)]
    pub target: Option<String>,

    /// Seed for entity sampling; OS entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_classify_k")]
    pub classify_k: usize,

    /// Comma-separated query vector for the classifier
    #[serde(default = "default_query")]
    pub query: Vec<f64>,
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("data/critics.json")
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_classify_k() -> usize {
    3
}

fn default_query() -> Vec<f64> {
    vec![0.0, 0.0]
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config: Config = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit `(KEY, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(AppError::InvalidConfig(
                "RECOMMENDER_TOP_K must be > 0".to_string(),
            ));
        }

        if self.classify_k == 0 {
            return Err(AppError::InvalidConfig(
                "RECOMMENDER_CLASSIFY_K must be > 0".to_string(),
            ));
        }

        if self.query.is_empty() {
            return Err(AppError::InvalidConfig(
                "RECOMMENDER_QUERY must contain at least one value".to_string(),
            ));
        }

        Ok(())
    }
}
