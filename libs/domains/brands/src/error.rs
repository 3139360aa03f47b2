use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BrandError {
    #[error("Brand not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Brand {0} still has products attached")]
    HasProducts(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BrandResult<T> = Result<T, BrandError>;

/// Convert BrandError to AppError for standardized error responses
impl From<BrandError> for AppError {
    fn from(err: BrandError) -> Self {
        match err {
            BrandError::NotFound(id) => AppError::NotFound(format!("Brand {} not found", id)),
            BrandError::Validation(msg) => AppError::BadRequest(msg),
            BrandError::HasProducts(id) => AppError::Conflict(format!(
                "Brand {} cannot be deleted while products reference it",
                id
            )),
            BrandError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BrandError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
