use thiserror::Error;

/// Error type that captures common store and export failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown transaction id: {0}")]
    NotFound(i64),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
