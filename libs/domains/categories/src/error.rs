use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    #[error("Parent category not found: {0}")]
    ParentNotFound(Uuid),

    #[error("Category {0} cannot be its own ancestor")]
    CycleDetected(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Category {0} still has products attached")]
    HasProducts(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

/// Convert CategoryError to AppError for standardized error responses
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CategoryError::ParentNotFound(id) => {
                AppError::BadRequest(format!("Parent category {} not found", id))
            }
            CategoryError::CycleDetected(id) => AppError::BadRequest(format!(
                "Category {} cannot be moved under one of its descendants",
                id
            )),
            CategoryError::Validation(msg) => AppError::BadRequest(msg),
            CategoryError::HasProducts(id) => AppError::Conflict(format!(
                "Category {} cannot be deleted while products reference it",
                id
            )),
            CategoryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
