use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category, validating the parent when one is given
    #[instrument(skip(self, input))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        if let Some(parent_id) = input.parent_id {
            self.repository
                .get_by_id(parent_id, false)
                .await?
                .ok_or(CategoryError::ParentNotFound(parent_id))?;
        }

        self.repository.create(input).await
    }

    /// Get a category by ID
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid, include_deleted: bool) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id, include_deleted)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// List categories with filters
    #[instrument(skip(self, filter))]
    pub async fn list_categories(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        self.repository.list(filter).await
    }

    /// Update a category.
    ///
    /// Re-binding the parent validates that the new parent exists and that
    /// the move does not make the category its own ancestor.
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        let mut category = self.get_category(id, false).await?;

        if let Some(Some(new_parent)) = input.parent_id {
            if new_parent == id {
                return Err(CategoryError::CycleDetected(id));
            }

            self.repository
                .get_by_id(new_parent, false)
                .await?
                .ok_or(CategoryError::ParentNotFound(new_parent))?;

            // Moving under a descendant would close a cycle
            let ancestors_of_parent = self.ancestors(new_parent).await?;
            if ancestors_of_parent.iter().any(|c| c.id == id) {
                return Err(CategoryError::CycleDetected(id));
            }
        }

        category.apply_update(input);
        self.repository.save(category).await
    }

    /// Direct children of a category
    #[instrument(skip(self))]
    pub async fn children(&self, id: Uuid) -> CategoryResult<Vec<Category>> {
        self.get_category(id, false).await?;
        self.repository.children(id).await
    }

    /// Ancestors of a category, nearest first
    ///
    /// Walks `parent_id` upwards. A visited-set guards against cycles that
    /// slipped in through direct SQL, turning them into an error instead
    /// of an infinite loop.
    #[instrument(skip(self))]
    pub async fn ancestors(&self, id: Uuid) -> CategoryResult<Vec<Category>> {
        let start = self.get_category(id, false).await?;

        let mut result = Vec::new();
        let mut visited: HashSet<Uuid> = HashSet::from([id]);
        let mut current = start.parent_id;

        while let Some(parent_id) = current {
            if !visited.insert(parent_id) {
                return Err(CategoryError::CycleDetected(parent_id));
            }

            let parent = self
                .repository
                .get_by_id(parent_id, true)
                .await?
                .ok_or(CategoryError::NotFound(parent_id))?;

            current = parent.parent_id;
            result.push(parent);
        }

        Ok(result)
    }

    /// Soft-delete a category.
    ///
    /// Refused while non-deleted products reference it; deleting the same
    /// category twice reports NotFound.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CategoryResult<()> {
        let live_products = self.repository.count_live_products(id).await?;
        if live_products > 0 {
            return Err(CategoryError::HasProducts(id));
        }

        let deleted = self.repository.soft_delete(id).await?;
        if !deleted {
            return Err(CategoryError::NotFound(id));
        }

        Ok(())
    }
}
