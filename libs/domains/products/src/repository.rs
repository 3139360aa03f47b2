use async_trait::async_trait;
use domain_brands::Brand;
use domain_categories::Category;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, CreateProductImage, Product, ProductImage, ProductRecord};
use crate::query::FindPlan;

/// Repository trait for Product persistence
///
/// Works at two granularities: flat [`ProductRecord`] rows for writes,
/// and assembled [`Product`] aggregates (brand + category + images) for
/// reads that go back to callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product row
    async fn create(&self, input: CreateProduct) -> ProductResult<ProductRecord>;

    /// Get a flat row by ID, optionally including soft-deleted rows
    async fn get_record(&self, id: Uuid, include_deleted: bool)
    -> ProductResult<Option<ProductRecord>>;

    /// Persist a fully-updated row
    async fn save(&self, record: ProductRecord) -> ProductResult<ProductRecord>;

    /// Get the assembled aggregate by ID
    async fn get_aggregate(&self, id: Uuid, include_deleted: bool)
    -> ProductResult<Option<Product>>;

    /// Execute a find plan: total match count plus the requested page of
    /// assembled aggregates
    async fn find(&self, plan: FindPlan) -> ProductResult<(u64, Vec<Product>)>;

    /// Brand lookup for referential validation (excludes soft-deleted)
    async fn get_brand(&self, id: Uuid) -> ProductResult<Option<Brand>>;

    /// Category lookup for referential validation (excludes soft-deleted)
    async fn get_category(&self, id: Uuid) -> ProductResult<Option<Category>>;

    /// Attach image metadata to a product
    async fn add_image(
        &self,
        product_id: Uuid,
        input: CreateProductImage,
    ) -> ProductResult<ProductImage>;

    /// Detach an image. Returns false when the image did not belong to
    /// the product.
    async fn remove_image(&self, product_id: Uuid, image_id: Uuid) -> ProductResult<bool>;

    /// Clear the main flag on every image of a product except one
    async fn clear_main_flags(&self, product_id: Uuid, except: Uuid) -> ProductResult<()>;
}
