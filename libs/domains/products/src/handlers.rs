use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnprocessableEntityResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};
use uuid::Uuid;

use crate::error::{FieldViolation, ProductResult};
use crate::models::{
    CreateProduct, CreateProductImage, FindProductsResponse, Product, ProductImage, UpdateProduct,
};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        find_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        add_product_image,
        remove_product_image
    ),
    components(
        schemas(
            Product,
            ProductImage,
            CreateProduct,
            UpdateProduct,
            CreateProductImage,
            FindProductsResponse,
            FieldViolation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(find_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/images", post(add_product_image))
        .route("/{id}/images/{imageId}", delete(remove_product_image))
        .with_state(shared_service)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
struct AccessParams {
    /// Apply storefront visibility rules: the product and its brand and
    /// category must all be active and not deleted
    #[serde(default)]
    public_access: bool,
}

/// Find products
///
/// Filters, orders and paginates the catalog. Unknown filter tokens and
/// malformed id lists are rejected with one violation per field; bad
/// ordering or pagination values silently fall back to defaults.
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "Paged product listing", body = FindProductsResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<FindProductsResponse>> {
    let response = service.find(query).await?;
    Ok(Json(response))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        AccessParams
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    Query(params): Query<AccessParams>,
) -> ProductResult<Json<Product>> {
    let product = service.find_by_id(id, params.public_access).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Soft-delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach image metadata to a product
#[utoipa::path(
    post,
    path = "/{id}/images",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = CreateProductImage,
    responses(
        (status = 201, description = "Image attached", body = ProductImage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product_image<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateProductImage>,
) -> ProductResult<impl IntoResponse> {
    let image = service.add_image(id, input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Detach an image from a product
#[utoipa::path(
    delete,
    path = "/{id}/images/{imageId}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("imageId" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 204, description = "Image detached"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_product_image<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path((id, image_id)): Path<(String, String)>,
) -> ProductResult<StatusCode> {
    let id = parse_uuid(&id)?;
    let image_id = parse_uuid(&image_id)?;

    service.remove_image(id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// UuidPath only handles single-segment paths, so the nested image route
// parses both segments itself with the same error shape.
fn parse_uuid(raw: &str) -> Result<Uuid, crate::error::ProductError> {
    Uuid::parse_str(raw)
        .map_err(|_| crate::error::ProductError::Validation(format!("Invalid UUID: {}", raw)))
}
