use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BrandError, BrandResult};
use crate::models::{Brand, BrandFilter, CreateBrand, UpdateBrand};

/// Repository trait for Brand persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// Create a new brand
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand>;

    /// Get a brand by ID, optionally including soft-deleted rows
    async fn get_by_id(&self, id: Uuid, include_deleted: bool) -> BrandResult<Option<Brand>>;

    /// List brands with optional filters
    async fn list(&self, filter: BrandFilter) -> BrandResult<Vec<Brand>>;

    /// Update an existing brand
    async fn update(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand>;

    /// Soft-delete a brand. Returns false when no live row matched.
    async fn soft_delete(&self, id: Uuid) -> BrandResult<bool>;

    /// Count non-deleted products still referencing this brand
    async fn count_live_products(&self, id: Uuid) -> BrandResult<u64>;
}

/// In-memory implementation of BrandRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBrandRepository {
    brands: Arc<RwLock<HashMap<Uuid, Brand>>>,
}

impl InMemoryBrandRepository {
    pub fn new() -> Self {
        Self {
            brands: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl BrandRepository for InMemoryBrandRepository {
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand> {
        let mut brands = self.brands.write().await;

        let brand = Brand::new(input);
        brands.insert(brand.id, brand.clone());

        tracing::info!(brand_id = %brand.id, "Created brand");
        Ok(brand)
    }

    async fn get_by_id(&self, id: Uuid, include_deleted: bool) -> BrandResult<Option<Brand>> {
        let brands = self.brands.read().await;
        Ok(brands
            .get(&id)
            .filter(|b| include_deleted || !b.is_deleted())
            .cloned())
    }

    async fn list(&self, filter: BrandFilter) -> BrandResult<Vec<Brand>> {
        let brands = self.brands.read().await;

        let mut result: Vec<Brand> = brands
            .values()
            .filter(|b| {
                if !filter.include_deleted && b.is_deleted() {
                    return false;
                }
                if let Some(active) = filter.active {
                    if b.active != active {
                        return false;
                    }
                }
                if let Some(ref query) = filter.query {
                    if !b.name.to_lowercase().contains(&query.to_lowercase()) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name.cmp(&b.name));

        let result: Vec<Brand> = result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand> {
        let mut brands = self.brands.write().await;

        let brand = brands.get_mut(&id).ok_or(BrandError::NotFound(id))?;
        brand.apply_update(input);

        Ok(brand.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> BrandResult<bool> {
        let mut brands = self.brands.write().await;

        match brands.get_mut(&id) {
            Some(brand) if !brand.is_deleted() => {
                brand.deleted_at = Some(Utc::now());
                brand.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_live_products(&self, _id: Uuid) -> BrandResult<u64> {
        // The in-memory store holds no products
        Ok(0)
    }
}
