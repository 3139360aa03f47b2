use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::BrandResult;
use crate::models::{Brand, BrandFilter, CreateBrand, UpdateBrand};
use crate::repository::BrandRepository;
use crate::service::BrandService;

const TAG: &str = "brands";

/// OpenAPI documentation for the Brands API
#[derive(OpenApi)]
#[openapi(
    paths(list_brands, create_brand, get_brand, update_brand, delete_brand),
    components(
        schemas(Brand, CreateBrand, UpdateBrand, BrandFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Brand management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the brand router with all HTTP endpoints
pub fn router<R: BrandRepository + 'static>(service: BrandService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_brands).post(create_brand))
        .route(
            "/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .with_state(shared_service)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
struct IncludeDeletedParams {
    /// Return the brand even when soft-deleted
    #[serde(default)]
    include_deleted: bool,
}

/// List brands with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(BrandFilter),
    responses(
        (status = 200, description = "List of brands", body = Vec<Brand>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_brands<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    Query(filter): Query<BrandFilter>,
) -> BrandResult<Json<Vec<Brand>>> {
    let brands = service.list_brands(filter).await?;
    Ok(Json(brands))
}

/// Create a new brand
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBrand,
    responses(
        (status = 201, description = "Brand created successfully", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateBrand>,
) -> BrandResult<impl IntoResponse> {
    let brand = service.create_brand(input).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Brand ID"),
        IncludeDeletedParams
    ),
    responses(
        (status = 200, description = "Brand found", body = Brand),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
    Query(params): Query<IncludeDeletedParams>,
) -> BrandResult<Json<Brand>> {
    let brand = service.get_brand(id, params.include_deleted).await?;
    Ok(Json(brand))
}

/// Update a brand
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Brand ID")
    ),
    request_body = UpdateBrand,
    responses(
        (status = 200, description = "Brand updated successfully", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateBrand>,
) -> BrandResult<Json<Brand>> {
    let brand = service.update_brand(id, input).await?;
    Ok(Json(brand))
}

/// Soft-delete a brand
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Brand ID")
    ),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
) -> BrandResult<StatusCode> {
    service.delete_brand(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
