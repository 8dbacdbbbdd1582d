use thiserror::Error;

/// Error type that captures common storage and data failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Shop data not found: {0}")]
    NotFound(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
