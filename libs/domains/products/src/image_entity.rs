use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the product_images table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_path: String,
    pub thumbnail_path: Option<String>,
    pub main: bool,
    pub active: bool,
    pub product_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::entity::Entity",
        from = "Column::ProductId",
        to = "crate::entity::Column::Id"
    )]
    Product,
}

impl Related<crate::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ProductImage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            image_path: model.image_path,
            thumbnail_path: model.thumbnail_path,
            main: model.main,
            active: model.active,
            product_id: model.product_id,
        }
    }
}

impl From<crate::models::ProductImage> for ActiveModel {
    fn from(image: crate::models::ProductImage) -> Self {
        ActiveModel {
            id: Set(image.id),
            name: Set(image.name),
            description: Set(image.description),
            image_path: Set(image.image_path),
            thumbnail_path: Set(image.thumbnail_path),
            main: Set(image.main),
            active: Set(image.active),
            product_id: Set(image.product_id),
        }
    }
}
