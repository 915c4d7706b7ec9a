use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Similarity threshold must be within [0.0, 1.0], got {0}")]
    InvalidThreshold(f64),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
