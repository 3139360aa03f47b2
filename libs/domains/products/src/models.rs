use chrono::{DateTime, Utc};
use domain_brands::Brand;
use domain_categories::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Custom validator for prices: non-negative with at most two decimals
fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    if price.scale() > 2 {
        return Err(validator::ValidationError::new("price_scale"));
    }
    Ok(())
}

/// Flat product row as persisted, without its joined relations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: Uuid,
    /// Internal article code, at most 13 characters
    pub code: String,
    pub name: String,
    /// Manufacturer model designation, at most 25 characters
    pub model: String,
    /// Unit price with two-decimal precision
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub active: bool,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product aggregate: the row joined with brand, category and images
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub model: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub brand: Brand,
    pub category: Category,
    /// Images with the main image first
    pub images: Vec<ProductImage>,
}

/// Product image metadata; binaries live in object storage
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Object-storage key of the original upload
    pub image_path: String,
    /// Object-storage key of the generated thumbnail
    pub thumbnail_path: Option<String>,
    /// At most one image per product carries the main flag
    pub main: bool,
    pub active: bool,
    pub product_id: Uuid,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 13))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 25))]
    pub model: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity_in_stock: i32,
    #[serde(default)]
    pub active: bool,
    pub brand_id: Uuid,
    pub category_id: Uuid,
}

/// DTO for updating an existing product; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 13))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 25))]
    pub model: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub quantity_in_stock: Option<i32>,
    pub active: Option<bool>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// DTO for attaching image metadata to a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductImage {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub image_path: String,
    pub thumbnail_path: Option<String>,
    #[serde(default)]
    pub main: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Paged find envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindProductsResponse {
    /// Normalized free-text predicate; absent when none applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_query: Option<String>,
    /// Total matches across all pages
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    /// Ordering actually applied, as `column_direction` tokens
    pub order_by: Vec<String>,
    pub results: Vec<Product>,
}

impl ProductRecord {
    /// Create a new record from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            code: input.code,
            name: input.name,
            model: input.model,
            price: input.price,
            quantity_in_stock: input.quantity_in_stock,
            active: input.active,
            brand_id: input.brand_id,
            category_id: input.category_id,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity_in_stock {
            self.quantity_in_stock = quantity;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(brand_id) = update.brand_id {
            self.brand_id = brand_id;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Product {
    /// Assemble the aggregate from its parts
    pub fn assemble(
        record: ProductRecord,
        brand: Brand,
        category: Category,
        images: Vec<ProductImage>,
    ) -> Self {
        Self {
            id: record.id,
            code: record.code,
            name: record.name,
            model: record.model,
            price: record.price,
            quantity_in_stock: record.quantity_in_stock,
            active: record.active,
            deleted_at: record.deleted_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
            brand_id: record.brand_id,
            category_id: record.category_id,
            brand,
            category,
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_input() -> CreateProduct {
        CreateProduct {
            code: "ABC123".into(),
            name: "Bookshelf speaker".into(),
            model: "BS-42".into(),
            price: Decimal::new(19999, 2),
            quantity_in_stock: 5,
            active: true,
            brand_id: Uuid::now_v7(),
            category_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn create_product_validates() {
        assert!(create_input().validate().is_ok());
    }

    #[test]
    fn code_longer_than_13_chars_is_rejected() {
        let mut input = create_input();
        input.code = "X".repeat(14);
        assert!(input.validate().is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut input = create_input();
        input.price = Decimal::new(-100, 2);
        assert!(input.validate().is_err());
    }

    #[test]
    fn price_with_three_decimals_is_rejected() {
        let mut input = create_input();
        input.price = Decimal::new(19999, 3);
        assert!(input.validate().is_err());
    }

    #[test]
    fn envelope_omits_absent_text_query() {
        let envelope = FindProductsResponse {
            text_query: None,
            count: 0,
            page: 1,
            page_size: 10,
            order_by: vec!["name_asc".into()],
            results: vec![],
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("textQuery").is_none());

        let with_text = FindProductsResponse {
            text_query: Some("speaker".into()),
            ..envelope
        };
        let json = serde_json::to_value(&with_text).unwrap();
        assert_eq!(json["textQuery"], "speaker");
    }

    #[test]
    fn assembled_product_carries_top_level_reference_ids() {
        let now = Utc::now();
        let input = create_input();
        let brand = Brand {
            id: input.brand_id,
            name: "Acme".into(),
            active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        let category = Category {
            id: input.category_id,
            name: "Audio".into(),
            active: true,
            parent_id: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        let product = Product::assemble(ProductRecord::new(input), brand, category, vec![]);

        assert_eq!(product.brand_id, product.brand.id);
        assert_eq!(product.category_id, product.category.id);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["brandId"], json["brand"]["id"]);
        assert_eq!(json["categoryId"], json["category"]["id"]);
    }

    #[test]
    fn apply_update_rebinds_brand() {
        let mut record = ProductRecord::new(create_input());
        let new_brand = Uuid::now_v7();

        record.apply_update(UpdateProduct {
            brand_id: Some(new_brand),
            ..Default::default()
        });

        assert_eq!(record.brand_id, new_brand);
    }
}
