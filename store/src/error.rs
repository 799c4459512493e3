use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("state file is corrupted: {0}")]
    Corrupted(String),
}
