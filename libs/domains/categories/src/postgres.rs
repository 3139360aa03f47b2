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
    error::{CategoryError, CategoryResult},
    models::{Category, CategoryFilter, CreateCategory},
    repository::CategoryRepository,
};

pub struct PgCategoryRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid, include_deleted: bool) -> CategoryResult<Option<Category>> {
        let mut query = entity::Entity::find().filter(entity::Column::Id.eq(id));

        if !include_deleted {
            query = query.filter(entity::Column::DeletedAt.is_null());
        }

        let model = query
            .one(self.base.db())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        let mut query = entity::Entity::find();

        if !filter.include_deleted {
            query = query.filter(entity::Column::DeletedAt.is_null());
        }

        if let Some(active) = filter.active {
            query = query.filter(entity::Column::Active.eq(active));
        }

        if let Some(parent_id) = filter.parent_id {
            query = query.filter(entity::Column::ParentId.eq(parent_id));
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
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn children(&self, id: Uuid) -> CategoryResult<Vec<Category>> {
        let models = entity::Entity::find()
            .filter(entity::Column::ParentId.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .order_by_asc(entity::Column::Name)
            .all(self.base.db())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, category: Category) -> CategoryResult<Category> {
        let id = category.id;
        let active_model: entity::ActiveModel = category.into();

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(category_id = %id, "Updated category");
        Ok(updated_model.into())
    }

    async fn soft_delete(&self, id: Uuid) -> CategoryResult<bool> {
        let model = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .one(self.base.db())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        let Some(model) = model else {
            return Ok(false);
        };

        let mut active_model: entity::ActiveModel = model.into();
        active_model.deleted_at = Set(Some(Utc::now().into()));

        self.base
            .update(active_model)
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(category_id = %id, "Soft-deleted category");
        Ok(true)
    }

    async fn count_live_products(&self, id: Uuid) -> CategoryResult<u64> {
        // Raw count against the products table, which lives in another
        // domain crate.
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*) AS count FROM products WHERE category_id = $1 AND deleted_at IS NULL",
            [id.into()],
        );

        let row = self
            .base
            .db()
            .query_one_raw(stmt)
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        let count: i64 = match row {
            Some(row) => row
                .try_get("", "count")
                .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?,
            None => 0,
        };

        Ok(count as u64)
    }
}
