use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, CreateProductImage, FindProductsResponse, Product, ProductImage, UpdateProduct,
};
use crate::query::{self, ProductQuery};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product.
    ///
    /// Brand and category must exist and not be soft-deleted; the returned
    /// aggregate is re-read after insert so it carries the joined rows.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository
            .get_brand(input.brand_id)
            .await?
            .ok_or(ProductError::BrandNotFound(input.brand_id))?;
        self.repository
            .get_category(input.category_id)
            .await?
            .ok_or(ProductError::CategoryNotFound(input.category_id))?;

        let record = self.repository.create(input).await?;

        self.repository
            .get_aggregate(record.id, true)
            .await?
            .ok_or_else(|| {
                ProductError::Internal(format!("Product {} vanished after insert", record.id))
            })
    }

    /// Update a product.
    ///
    /// Soft-deleted products remain updatable. Re-binding `brand_id` or
    /// `category_id` re-validates the target's existence.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let mut record = self
            .repository
            .get_record(id, true)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if let Some(brand_id) = input.brand_id {
            self.repository
                .get_brand(brand_id)
                .await?
                .ok_or(ProductError::BrandNotFound(brand_id))?;
        }
        if let Some(category_id) = input.category_id {
            self.repository
                .get_category(category_id)
                .await?
                .ok_or(ProductError::CategoryNotFound(category_id))?;
        }

        record.apply_update(input);
        self.repository.save(record).await?;

        self.repository
            .get_aggregate(id, true)
            .await?
            .ok_or_else(|| ProductError::Internal(format!("Product {} vanished after update", id)))
    }

    /// Execute a find query.
    ///
    /// Resolver violations surface as a single error carrying every bad
    /// field; valid queries return the paged envelope.
    #[instrument(skip(self, raw))]
    pub async fn find(&self, raw: ProductQuery) -> ProductResult<FindProductsResponse> {
        let plan = query::resolve(raw).map_err(ProductError::QueryValidation)?;

        let (count, results) = self.repository.find(plan.clone()).await?;

        Ok(FindProductsResponse {
            text_query: plan.text.clone(),
            count,
            page: plan.page,
            page_size: plan.page_size,
            order_by: plan.order_tokens(),
            results,
        })
    }

    /// Get a product aggregate by ID.
    ///
    /// Public access only sees active, non-deleted products whose brand
    /// and category are themselves active and non-deleted; internal access
    /// sees everything.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid, public_access: bool) -> ProductResult<Product> {
        if !public_access {
            return self
                .repository
                .get_aggregate(id, true)
                .await?
                .ok_or(ProductError::NotFound(id));
        }

        let product = self
            .repository
            .get_aggregate(id, false)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let visible = product.active
            && product.brand.active
            && product.brand.deleted_at.is_none()
            && product.category.active
            && product.category.deleted_at.is_none();

        if !visible {
            return Err(ProductError::NotFound(id));
        }

        Ok(product)
    }

    /// Soft-delete a product. Deleting the same product twice reports
    /// NotFound.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let mut record = self
            .repository
            .get_record(id, false)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        record.deleted_at = Some(Utc::now());
        record.updated_at = Utc::now();
        self.repository.save(record).await?;

        Ok(())
    }

    /// Attach image metadata to a product.
    ///
    /// Setting `main` clears the flag on the product's other images so at
    /// most one image is ever main.
    #[instrument(skip(self, input))]
    pub async fn add_image(
        &self,
        product_id: Uuid,
        input: CreateProductImage,
    ) -> ProductResult<ProductImage> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository
            .get_record(product_id, false)
            .await?
            .ok_or(ProductError::NotFound(product_id))?;

        let make_main = input.main;
        let image = self.repository.add_image(product_id, input).await?;

        if make_main {
            self.repository.clear_main_flags(product_id, image.id).await?;
        }

        Ok(image)
    }

    /// Detach an image from a product
    #[instrument(skip(self))]
    pub async fn remove_image(&self, product_id: Uuid, image_id: Uuid) -> ProductResult<()> {
        self.repository
            .get_record(product_id, false)
            .await?
            .ok_or(ProductError::NotFound(product_id))?;

        let removed = self.repository.remove_image(product_id, image_id).await?;
        if !removed {
            return Err(ProductError::ImageNotFound(image_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductRecord;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use domain_brands::Brand;
    use domain_categories::Category;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn brand(active: bool) -> Brand {
        let now = Utc::now();
        Brand {
            id: Uuid::now_v7(),
            name: "Acme".into(),
            active,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn category(active: bool) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::now_v7(),
            name: "Audio".into(),
            active,
            parent_id: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn record(id: Uuid) -> ProductRecord {
        let now = Utc::now();
        ProductRecord {
            id,
            code: "ABC123".into(),
            name: "Speaker".into(),
            model: "BS-42".into(),
            price: Decimal::new(19999, 2),
            quantity_in_stock: 3,
            active: true,
            brand_id: Uuid::now_v7(),
            category_id: Uuid::now_v7(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn aggregate(id: Uuid, active: bool, brand_active: bool) -> Product {
        let mut rec = record(id);
        rec.active = active;
        Product::assemble(rec, brand(brand_active), category(true), vec![])
    }

    fn create_input(brand_id: Uuid, category_id: Uuid) -> CreateProduct {
        CreateProduct {
            code: "ABC123".into(),
            name: "Speaker".into(),
            model: "BS-42".into(),
            price: Decimal::new(19999, 2),
            quantity_in_stock: 3,
            active: true,
            brand_id,
            category_id,
        }
    }

    #[tokio::test]
    async fn create_with_unknown_brand_is_rejected() {
        let mut mock_repo = MockProductRepository::new();
        let brand_id = Uuid::now_v7();
        let category_id = Uuid::now_v7();

        mock_repo
            .expect_get_brand()
            .with(eq(brand_id))
            .returning(|_| Ok(None));
        // No create expectation: nothing must be persisted

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(create_input(brand_id, category_id))
            .await;

        assert!(matches!(result, Err(ProductError::BrandNotFound(_))));
    }

    #[tokio::test]
    async fn find_reports_every_bad_field() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let result = service
            .find(ProductQuery {
                active: Some("bogus".into()),
                brand_ids: Some("oops".into()),
                ..ProductQuery::default()
            })
            .await;

        match result {
            Err(ProductError::QueryValidation(violations)) => {
                let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["active", "brandIds"]);
            }
            other => panic!("expected QueryValidation, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn find_echoes_normalized_text_and_defaults() {
        let mut mock_repo = MockProductRepository::new();

        mock_repo.expect_find().returning(|_| Ok((0, vec![])));

        let service = ProductService::new(mock_repo);
        let response = service
            .find(ProductQuery {
                query: Some("  %speaker  ".into()),
                ..ProductQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(response.text_query.as_deref(), Some("speaker"));
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 10);
        assert_eq!(response.order_by, vec!["name_asc", "active_asc"]);
    }

    #[tokio::test]
    async fn public_find_by_id_hides_inactive_brand() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_get_aggregate()
            .with(eq(id), eq(false))
            .returning(|id, _| Ok(Some(aggregate(id, true, false))));

        let service = ProductService::new(mock_repo);
        let result = service.find_by_id(id, true).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn internal_find_by_id_sees_soft_deleted() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_get_aggregate()
            .with(eq(id), eq(true))
            .returning(|id, _| {
                let mut product = aggregate(id, false, false);
                product.deleted_at = Some(Utc::now());
                Ok(Some(product))
            });

        let service = ProductService::new(mock_repo);
        assert!(service.find_by_id(id, false).await.is_ok());
    }

    #[tokio::test]
    async fn second_delete_reports_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();

        // Soft-deleted rows are invisible to the not-deleted lookup
        mock_repo
            .expect_get_record()
            .with(eq(id), eq(false))
            .returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn adding_main_image_clears_other_flags() {
        let mut mock_repo = MockProductRepository::new();
        let product_id = Uuid::now_v7();
        let image_id = Uuid::now_v7();

        mock_repo
            .expect_get_record()
            .with(eq(product_id), eq(false))
            .returning(|id, _| Ok(Some(record(id))));
        mock_repo
            .expect_add_image()
            .returning(move |product_id, input| {
                Ok(ProductImage {
                    id: image_id,
                    name: input.name,
                    description: input.description,
                    image_path: input.image_path,
                    thumbnail_path: input.thumbnail_path,
                    main: input.main,
                    active: input.active,
                    product_id,
                })
            });
        mock_repo
            .expect_clear_main_flags()
            .with(eq(product_id), eq(image_id))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProductService::new(mock_repo);
        let image = service
            .add_image(
                product_id,
                CreateProductImage {
                    name: Some("front".into()),
                    description: None,
                    image_path: format!("products/{}/front", product_id),
                    thumbnail_path: None,
                    main: true,
                    active: true,
                },
            )
            .await
            .unwrap();

        assert!(image.main);
    }
}
