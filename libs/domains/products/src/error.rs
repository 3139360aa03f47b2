use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// A single named validation failure in a find query
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Wire name of the offending field
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn unrecognized(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("unrecognized value '{}'", value),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Brand not found: {0}")]
    BrandNotFound(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Image not found: {0}")]
    ImageNotFound(Uuid),

    #[error("Invalid query parameters")]
    QueryValidation(Vec<FieldViolation>),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::BrandNotFound(id) => {
                AppError::NotFound(format!("Brand {} not found", id))
            }
            ProductError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            ProductError::ImageNotFound(id) => {
                AppError::NotFound(format!("Image {} not found", id))
            }
            ProductError::QueryValidation(violations) => {
                let details = serde_json::to_value(&violations).unwrap_or_default();
                AppError::unprocessable("Invalid query parameters", details)
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
