pub mod connection;
pub mod measurement;
pub mod profile;
pub mod transfer;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("invalid measurement data: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
