use std::collections::HashMap;

use async_trait::async_trait;
use database::BaseRepository;
use domain_brands::Brand;
use domain_categories::Category;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    image_entity,
    models::{CreateProduct, CreateProductImage, Product, ProductImage, ProductRecord},
    query::{ActiveFilter, DeletedFilter, FindPlan, OrderColumn, OrderDirection},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Assemble aggregates for a page of rows with three batched lookups
    /// instead of per-row queries. List views only carry each product's
    /// main image; detail views carry all of them.
    async fn assemble_all(
        &self,
        models: Vec<entity::Model>,
        main_images_only: bool,
    ) -> ProductResult<Vec<Product>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let product_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let brand_ids: Vec<Uuid> = models.iter().map(|m| m.brand_id).collect();
        let category_ids: Vec<Uuid> = models.iter().map(|m| m.category_id).collect();

        // Soft-deleted brands and categories still appear inside the
        // aggregate so internal callers see the full picture.
        let brands: HashMap<Uuid, Brand> = domain_brands::entity::Entity::find()
            .filter(domain_brands::entity::Column::Id.is_in(brand_ids))
            .all(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let categories: HashMap<Uuid, Category> = domain_categories::entity::Entity::find()
            .filter(domain_categories::entity::Column::Id.is_in(category_ids))
            .all(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let mut images: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
        let mut image_query = image_entity::Entity::find()
            .filter(image_entity::Column::ProductId.is_in(product_ids));
        if main_images_only {
            image_query = image_query.filter(image_entity::Column::Main.eq(true));
        }
        let image_rows = image_query
            .order_by_desc(image_entity::Column::Main)
            .order_by_asc(image_entity::Column::Id)
            .all(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;
        for row in image_rows {
            images.entry(row.product_id).or_default().push(row.into());
        }

        let mut products = Vec::with_capacity(models.len());
        for model in models {
            let brand = brands.get(&model.brand_id).cloned().ok_or_else(|| {
                ProductError::Internal(format!("Brand {} missing for product {}", model.brand_id, model.id))
            })?;
            let category = categories.get(&model.category_id).cloned().ok_or_else(|| {
                ProductError::Internal(format!(
                    "Category {} missing for product {}",
                    model.category_id, model.id
                ))
            })?;
            let product_images = images.remove(&model.id).unwrap_or_default();

            products.push(Product::assemble(model.into(), brand, category, product_images));
        }

        Ok(products)
    }
}

/// Translate a resolved plan into a filtered select over products
fn apply_plan(plan: &FindPlan) -> Select<entity::Entity> {
    let mut query = entity::Entity::find();

    if let Some(ref text) = plan.text {
        query = query.filter(
            Expr::col((entity::Entity, entity::Column::Name)).ilike(format!("%{}%", text)),
        );
    }

    match plan.active {
        ActiveFilter::Active => query = query.filter(entity::Column::Active.eq(true)),
        ActiveFilter::Inactive => query = query.filter(entity::Column::Active.eq(false)),
        ActiveFilter::All => {}
    }

    match plan.deleted {
        DeletedFilter::NotDeleted => query = query.filter(entity::Column::DeletedAt.is_null()),
        DeletedFilter::Deleted => query = query.filter(entity::Column::DeletedAt.is_not_null()),
        DeletedFilter::All => {}
    }

    if plan.brand_active != ActiveFilter::All {
        let wanted = plan.brand_active == ActiveFilter::Active;
        query = query
            .join(JoinType::InnerJoin, entity::Relation::Brand.def())
            .filter(domain_brands::entity::Column::Active.eq(wanted));
    }

    if plan.category_active != ActiveFilter::All {
        let wanted = plan.category_active == ActiveFilter::Active;
        query = query
            .join(JoinType::InnerJoin, entity::Relation::Category.def())
            .filter(domain_categories::entity::Column::Active.eq(wanted));
    }

    if let Some(ref ids) = plan.brand_ids {
        query = query.filter(entity::Column::BrandId.is_in(ids.iter().copied()));
    }

    if let Some(ref ids) = plan.category_ids {
        query = query.filter(entity::Column::CategoryId.is_in(ids.iter().copied()));
    }

    for (column, direction) in &plan.order_by {
        let column = match column {
            OrderColumn::Name => entity::Column::Name,
            OrderColumn::Active => entity::Column::Active,
        };
        let direction = match direction {
            OrderDirection::Asc => Order::Asc,
            OrderDirection::Desc => Order::Desc,
        };
        query = query.order_by(column, direction);
    }

    query
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<ProductRecord> {
        let record = ProductRecord::new(input);
        let active_model: entity::ActiveModel = record.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_record(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> ProductResult<Option<ProductRecord>> {
        let mut query = entity::Entity::find().filter(entity::Column::Id.eq(id));

        if !include_deleted {
            query = query.filter(entity::Column::DeletedAt.is_null());
        }

        let model = query
            .one(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }

    async fn save(&self, record: ProductRecord) -> ProductResult<ProductRecord> {
        let id = record.id;
        let active_model: entity::ActiveModel = record.into();

        let model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn get_aggregate(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> ProductResult<Option<Product>> {
        let mut query = entity::Entity::find().filter(entity::Column::Id.eq(id));

        if !include_deleted {
            query = query.filter(entity::Column::DeletedAt.is_null());
        }

        let model = query
            .one(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        let Some(model) = model else {
            return Ok(None);
        };

        Ok(self.assemble_all(vec![model], false).await?.into_iter().next())
    }

    async fn find(&self, plan: FindPlan) -> ProductResult<(u64, Vec<Product>)> {
        let query = apply_plan(&plan);

        let count = query
            .clone()
            .count(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        let models = query
            .limit(plan.page_size)
            .offset(plan.offset())
            .all(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        let products = self.assemble_all(models, true).await?;
        Ok((count, products))
    }

    async fn get_brand(&self, id: Uuid) -> ProductResult<Option<Brand>> {
        let model = domain_brands::entity::Entity::find()
            .filter(domain_brands::entity::Column::Id.eq(id))
            .filter(domain_brands::entity::Column::DeletedAt.is_null())
            .one(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }

    async fn get_category(&self, id: Uuid) -> ProductResult<Option<Category>> {
        let model = domain_categories::entity::Entity::find()
            .filter(domain_categories::entity::Column::Id.eq(id))
            .filter(domain_categories::entity::Column::DeletedAt.is_null())
            .one(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }

    async fn add_image(
        &self,
        product_id: Uuid,
        input: CreateProductImage,
    ) -> ProductResult<ProductImage> {
        let image = ProductImage {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            image_path: input.image_path,
            thumbnail_path: input.thumbnail_path,
            main: input.main,
            active: input.active,
            product_id,
        };
        let active_model: image_entity::ActiveModel = image.into();

        let model = image_entity::Entity::insert(active_model)
            .exec_with_returning(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %product_id, image_id = %model.id, "Attached product image");
        Ok(model.into())
    }

    async fn remove_image(&self, product_id: Uuid, image_id: Uuid) -> ProductResult<bool> {
        let result = image_entity::Entity::delete_many()
            .filter(image_entity::Column::Id.eq(image_id))
            .filter(image_entity::Column::ProductId.eq(product_id))
            .exec(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %product_id, image_id = %image_id, "Detached product image");
        }
        Ok(result.rows_affected > 0)
    }

    async fn clear_main_flags(&self, product_id: Uuid, except: Uuid) -> ProductResult<()> {
        image_entity::Entity::update_many()
            .col_expr(image_entity::Column::Main, Expr::value(false))
            .filter(image_entity::Column::ProductId.eq(product_id))
            .filter(image_entity::Column::Id.ne(except))
            .filter(image_entity::Column::Main.eq(true))
            .exec(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(())
    }
}
