//! Categories Domain
//!
//! Domain implementation for the category tree. Categories form an
//! adjacency-list tree over `parent_id`: every category has at most one
//! parent and any number of children. Ancestry is computed lazily by
//! walking `parent_id` upwards; there is no materialized closure table.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{CategoryService, PgCategoryRepository};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgCategoryRepository::new(db);
//! let service = CategoryService::new(repository);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CategoryError, CategoryResult};
pub use models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
