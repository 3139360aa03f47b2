use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};

/// Repository trait for Category persistence
///
/// Implementations back the category tree; ancestry is resolved by the
/// service through repeated `get_by_id` walks, so the repository only
/// needs flat row access plus a direct-children query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    /// Get a category by ID, optionally including soft-deleted rows
    async fn get_by_id(&self, id: Uuid, include_deleted: bool) -> CategoryResult<Option<Category>>;

    /// List categories with optional filters
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>>;

    /// Direct (non-deleted) children of a category
    async fn children(&self, id: Uuid) -> CategoryResult<Vec<Category>>;

    /// Persist a fully-updated category row
    async fn save(&self, category: Category) -> CategoryResult<Category>;

    /// Soft-delete a category. Returns false when no live row matched.
    async fn soft_delete(&self, id: Uuid) -> CategoryResult<bool>;

    /// Count non-deleted products still referencing this category
    async fn count_live_products(&self, id: Uuid) -> CategoryResult<u64>;
}
