use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Statement,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{BrandError, BrandResult},
    models::{Brand, BrandFilter, CreateBrand, UpdateBrand},
    repository::BrandRepository,
};

pub struct PgBrandRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgBrandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(brand_id = %model.id, "Created brand");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid, include_deleted: bool) -> BrandResult<Option<Brand>> {
        let mut query = entity::Entity::find().filter(entity::Column::Id.eq(id));

        if !include_deleted {
            query = query.filter(entity::Column::DeletedAt.is_null());
        }

        let model = query
            .one(self.base.db())
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: BrandFilter) -> BrandResult<Vec<Brand>> {
        let mut query = entity::Entity::find();

        if !filter.include_deleted {
            query = query.filter(entity::Column::DeletedAt.is_null());
        }

        if let Some(active) = filter.active {
            query = query.filter(entity::Column::Active.eq(active));
        }

        if let Some(ref text) = filter.query {
            query = query.filter(entity::Column::Name.contains(text));
        }

        query = query
            .order_by_asc(entity::Column::Name)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query
            .all(self.base.db())
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?
            .ok_or(BrandError::NotFound(id))?;

        let mut brand: Brand = model.into();
        brand.apply_update(input);

        let updated_model = self
            .base
            .update(brand.into())
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(brand_id = %id, "Updated brand");
        Ok(updated_model.into())
    }

    async fn soft_delete(&self, id: Uuid) -> BrandResult<bool> {
        let model = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .one(self.base.db())
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?;

        let Some(model) = model else {
            return Ok(false);
        };

        let mut active_model: entity::ActiveModel = model.into();
        active_model.deleted_at = Set(Some(Utc::now().into()));

        self.base
            .update(active_model)
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(brand_id = %id, "Soft-deleted brand");
        Ok(true)
    }

    async fn count_live_products(&self, id: Uuid) -> BrandResult<u64> {
        // The products table belongs to another domain crate; a raw count
        // avoids a crate dependency for one referential guard.
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*) AS count FROM products WHERE brand_id = $1 AND deleted_at IS NULL",
            [id.into()],
        );

        let row = self
            .base
            .db()
            .query_one_raw(stmt)
            .await
            .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?;

        let count: i64 = match row {
            Some(row) => row
                .try_get("", "count")
                .map_err(|e| BrandError::Internal(format!("Database error: {}", e)))?,
            None => 0,
        };

        Ok(count as u64)
    }
}
