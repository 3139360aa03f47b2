use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub model: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub active: bool,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub deleted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_brands::entity::Entity",
        from = "Column::BrandId",
        to = "domain_brands::entity::Column::Id"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "domain_categories::entity::Entity",
        from = "Column::CategoryId",
        to = "domain_categories::entity::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "crate::image_entity::Entity")]
    Images,
}

impl Related<domain_brands::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<domain_categories::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<crate::image_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ProductRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            model: model.model,
            price: model.price,
            quantity_in_stock: model.quantity_in_stock,
            active: model.active,
            brand_id: model.brand_id,
            category_id: model.category_id,
            deleted_at: model.deleted_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::ProductRecord> for ActiveModel {
    fn from(record: crate::models::ProductRecord) -> Self {
        ActiveModel {
            id: Set(record.id),
            code: Set(record.code),
            name: Set(record.name),
            model: Set(record.model),
            price: Set(record.price),
            quantity_in_stock: Set(record.quantity_in_stock),
            active: Set(record.active),
            brand_id: Set(record.brand_id),
            category_id: Set(record.category_id),
            deleted_at: Set(record.deleted_at.map(Into::into)),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        }
    }
}
