//! Object Storage
//!
//! S3-backed binary storage for product images plus the thumbnail
//! transform. Rows in the database only carry object keys; the bytes
//! live here.
//!
//! ```text
//! ┌──────────────┐
//! │ ObjectStorage│  ← put/get/list/delete/presign against one bucket
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  aws-sdk-s3  │
//! └──────────────┘
//! ```

pub mod config;
pub mod error;
pub mod s3;
pub mod thumbnail;

pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use s3::ObjectStorage;
pub use thumbnail::{DEFAULT_THUMBNAIL_EDGE, thumbnail};
