use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BrandError, BrandResult};
use crate::models::{Brand, BrandFilter, CreateBrand, UpdateBrand};
use crate::repository::BrandRepository;

/// Service layer for Brand business logic
#[derive(Clone)]
pub struct BrandService<R: BrandRepository> {
    repository: Arc<R>,
}

impl<R: BrandRepository> BrandService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new brand
    #[instrument(skip(self, input))]
    pub async fn create_brand(&self, input: CreateBrand) -> BrandResult<Brand> {
        input
            .validate()
            .map_err(|e| BrandError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a brand by ID
    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: Uuid, include_deleted: bool) -> BrandResult<Brand> {
        self.repository
            .get_by_id(id, include_deleted)
            .await?
            .ok_or(BrandError::NotFound(id))
    }

    /// List brands with filters
    #[instrument(skip(self, filter))]
    pub async fn list_brands(&self, filter: BrandFilter) -> BrandResult<Vec<Brand>> {
        self.repository.list(filter).await
    }

    /// Update a brand
    #[instrument(skip(self, input))]
    pub async fn update_brand(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand> {
        input
            .validate()
            .map_err(|e| BrandError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Soft-delete a brand.
    ///
    /// Fails when non-deleted products still reference it; deleting the
    /// same brand twice reports NotFound.
    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: Uuid) -> BrandResult<()> {
        let live_products = self.repository.count_live_products(id).await?;
        if live_products > 0 {
            return Err(BrandError::HasProducts(id));
        }

        let deleted = self.repository.soft_delete(id).await?;
        if !deleted {
            return Err(BrandError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockBrandRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let mock_repo = MockBrandRepository::new();
        let service = BrandService::new(mock_repo);

        let result = service
            .create_brand(CreateBrand {
                name: "".into(),
                active: true,
            })
            .await;

        assert!(matches!(result, Err(BrandError::Validation(_))));
    }

    #[tokio::test]
    async fn get_missing_brand_is_not_found() {
        let mut mock_repo = MockBrandRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_get_by_id()
            .with(eq(id), eq(false))
            .returning(|_, _| Ok(None));

        let service = BrandService::new(mock_repo);
        let result = service.get_brand(id, false).await;

        assert!(matches!(result, Err(BrandError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_refused_while_products_remain() {
        let mut mock_repo = MockBrandRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_count_live_products()
            .with(eq(id))
            .returning(|_| Ok(2));

        let service = BrandService::new(mock_repo);
        let result = service.delete_brand(id).await;

        assert!(matches!(result, Err(BrandError::HasProducts(_))));
    }

    #[tokio::test]
    async fn second_delete_reports_not_found() {
        let mut mock_repo = MockBrandRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_count_live_products()
            .with(eq(id))
            .returning(|_| Ok(0));
        mock_repo
            .expect_soft_delete()
            .with(eq(id))
            .returning(|_| Ok(false));

        let service = BrandService::new(mock_repo);
        let result = service.delete_brand(id).await;

        assert!(matches!(result, Err(BrandError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_succeeds_for_live_brand() {
        let mut mock_repo = MockBrandRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_count_live_products()
            .with(eq(id))
            .returning(|_| Ok(0));
        mock_repo
            .expect_soft_delete()
            .with(eq(id))
            .returning(|_| Ok(true));

        let service = BrandService::new(mock_repo);
        assert!(service.delete_brand(id).await.is_ok());
    }
}
