use collab_filter::CollabError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to open {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid rating table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Not enough entities: need {needed}, found {found}")]
    NotEnoughEntities { needed: usize, found: usize },

    #[error(transparent)]
    Core(#[from] CollabError),
}

impl AppError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        AppError::Parse {
            line,
            message: message.into(),
        }
    }
}
