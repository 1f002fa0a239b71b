use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("empty corpus")]
    EmptyCorpus,
}

pub type Result<T> = std::result::Result<T, Error>;
