use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid factory description: {0}")]
    InvalidFactory(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt index file: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, Error>;
