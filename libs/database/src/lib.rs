//! Database connectivity for the catalog services.
//!
//! PostgreSQL via sea-orm, with connection retry, health checks and a
//! thin generic repository over `EntityTrait`.
//!
//! ```ignore
//! use database::postgres;
//!
//! let db = postgres::connect(&database_url).await?;
//! postgres::check_health(&db).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

#[cfg(feature = "postgres")]
pub use repository::BaseRepository;
