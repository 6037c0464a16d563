use thiserror::Error;

#[derive(Error, Debug)]
pub enum StormscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cache encoding error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("Cache decoding error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("Runtime model error: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, StormscopeError>;
