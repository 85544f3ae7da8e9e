use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollabError>;

/// Errors raised by the collaborative filtering core.
///
/// Sparse-data conditions (no overlap, zero variance, no positive neighbor)
/// are not errors; they resolve to `0.0` or an empty result. Every variant
/// here belongs to the invalid-argument class.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollabError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl CollabError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CollabError::InvalidArgument(msg.into())
    }
}
