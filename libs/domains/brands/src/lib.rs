//! Brands Domain
//!
//! Complete domain implementation for managing catalog brands.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_brands::{
//!     handlers,
//!     repository::InMemoryBrandRepository,
//!     service::BrandService,
//! };
//!
//! let repository = InMemoryBrandRepository::new();
//! let service = BrandService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{BrandError, BrandResult};
pub use models::{Brand, BrandFilter, CreateBrand, UpdateBrand};
pub use postgres::PgBrandRepository;
pub use repository::{BrandRepository, InMemoryBrandRepository};
pub use service::BrandService;
