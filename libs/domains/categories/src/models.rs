use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Category entity - a node in the catalog category tree
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,
    /// Category name
    pub name: String,
    /// Whether the category is visible to public queries
    pub active: bool,
    /// Parent category; `None` for roots
    pub parent_id: Option<Uuid>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    pub parent_id: Option<Uuid>,
}

/// DTO for updating an existing category
///
/// `parent_id` uses a double Option so the wire format can distinguish
/// "leave the parent alone" (absent) from "detach from the parent"
/// (explicit null).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub active: Option<bool>,
    #[serde(default, with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

mod double_option {
    use serde::{Deserialize, Deserializer};
    use uuid::Uuid;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Uuid>::deserialize(deserializer).map(Some)
    }
}

/// Query filters for listing categories
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    /// Case-insensitive name search
    pub query: Option<String>,
    pub active: Option<bool>,
    /// Restrict the listing to direct children of this category
    pub parent_id: Option<Uuid>,
    /// Include soft-deleted categories in the listing
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

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            query: None,
            active: None,
            parent_id: None,
            include_deleted: false,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Category {
    /// Create a new category from CreateCategory DTO
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            active: input.active,
            parent_id: input.parent_id,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateCategory DTO
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(parent_id) = update.parent_id {
            self.parent_id = parent_id;
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
    fn absent_parent_keeps_existing_value() {
        let parent = Uuid::now_v7();
        let mut category = Category::new(CreateCategory {
            name: "Audio".into(),
            active: true,
            parent_id: Some(parent),
        });

        let update: UpdateCategory = serde_json::from_str(r#"{ "name": "Hi-Fi" }"#).unwrap();
        category.apply_update(update);

        assert_eq!(category.name, "Hi-Fi");
        assert_eq!(category.parent_id, Some(parent));
    }

    #[test]
    fn explicit_null_detaches_parent() {
        let mut category = Category::new(CreateCategory {
            name: "Audio".into(),
            active: true,
            parent_id: Some(Uuid::now_v7()),
        });

        let update: UpdateCategory = serde_json::from_str(r#"{ "parentId": null }"#).unwrap();
        category.apply_update(update);

        assert_eq!(category.parent_id, None);
    }
}
