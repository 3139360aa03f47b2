use thiserror::Error;

/// Errors produced by the database layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("postgres error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("migration error: {0}")]
    MigrationError(String),

    #[error("{0}")]
    Generic(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
