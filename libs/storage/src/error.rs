use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Unreadable image data: {0}")]
    InvalidImage(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(#[from] core_config::ConfigError),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Wrap any SDK operation error, keeping the service-level message
    pub(crate) fn backend<E: std::fmt::Display>(err: E) -> Self {
        StorageError::Backend(err.to_string())
    }
}
