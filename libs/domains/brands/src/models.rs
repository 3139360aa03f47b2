use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Brand entity - a product manufacturer or label
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    /// Unique identifier
    pub id: Uuid,
    /// Brand name
    pub name: String,
    /// Whether the brand is visible to public queries
    pub active: bool,
    /// Soft-delete marker; `None` while the brand is live
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new brand
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrand {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

/// DTO for updating an existing brand
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrand {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub active: Option<bool>,
}

/// Query filters for listing brands
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BrandFilter {
    /// Case-insensitive name search
    pub query: Option<String>,
    pub active: Option<bool>,
    /// Include soft-deleted brands in the listing
    #[serde(default)]
    pub include_deleted: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for BrandFilter {
    fn default() -> Self {
        Self {
            query: None,
            active: None,
            include_deleted: false,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Brand {
    /// Create a new brand from CreateBrand DTO
    pub fn new(input: CreateBrand) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            active: input.active,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateBrand DTO
    pub fn apply_update(&mut self, update: UpdateBrand) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_brand_starts_live() {
        let brand = Brand::new(CreateBrand {
            name: "Acme".into(),
            active: true,
        });

        assert_eq!(brand.name, "Acme");
        assert!(brand.active);
        assert!(!brand.is_deleted());
    }

    #[test]
    fn apply_update_only_touches_present_fields() {
        let mut brand = Brand::new(CreateBrand {
            name: "Acme".into(),
            active: false,
        });

        brand.apply_update(UpdateBrand {
            name: None,
            active: Some(true),
        });

        assert_eq!(brand.name, "Acme");
        assert!(brand.active);
    }
}
