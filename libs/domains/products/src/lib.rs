//! Products Domain
//!
//! The product aggregate: a product row joined with its brand, category
//! and images, plus the query resolver that turns raw request parameters
//! into an executable find plan.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────┐
//! │   Service   │ ←── │ Resolver │  ← query normalization/validation
//! └──────┬──────┘     └──────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! The resolver is deliberately asymmetric: enum tokens and id lists fail
//! loudly with collected field violations, while ordering and pagination
//! inputs silently fall back to defaults.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod image_entity;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{FieldViolation, ProductError, ProductResult};
pub use models::{
    CreateProduct, CreateProductImage, FindProductsResponse, Product, ProductImage, ProductRecord,
    UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use query::{ActiveFilter, DeletedFilter, FindPlan, OrderColumn, OrderDirection, ProductQuery};
pub use repository::ProductRepository;
pub use service::ProductService;
