//! Image binary routes
//!
//! The products domain stores image metadata rows; these routes move the
//! actual bytes in and out of object storage and keep the two in sync.
//! Originals land at `products/{id}/{image_id}`, thumbnails next to them
//! at `products/{id}/{image_id}_thumb.jpg`.

use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{AppError, UuidPath};
use domain_products::{
    CreateProductImage, PgProductRepository, ProductImage, ProductService,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{DEFAULT_THUMBNAIL_EDGE, ObjectStorage, StorageError, thumbnail};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::state::AppState;

const TAG: &str = "product-images";

/// OpenAPI documentation for the image binary endpoints
#[derive(OpenApi)]
#[openapi(
    paths(upload_image, download_image, presign_upload),
    components(schemas(PresignRequest, PresignResponse)),
    tags(
        (name = TAG, description = "Product image upload and download")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
struct ImageContext {
    service: Arc<ProductService<PgProductRepository>>,
    storage: ObjectStorage,
}

pub fn router(state: &AppState) -> Router {
    let context = ImageContext {
        service: Arc::new(ProductService::new(PgProductRepository::new(
            state.db.clone(),
        ))),
        storage: state.storage.clone(),
    };

    Router::new()
        .route("/{id}/images/upload", post(upload_image))
        .route("/{id}/images/presign", post(presign_upload))
        .route("/{id}/images/{imageId}/download", get(download_image))
        .with_state(context)
}

fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(key) => AppError::NotFound(format!("Object {} not found", key)),
        StorageError::InvalidImage(msg) => {
            AppError::BadRequest(format!("Unreadable image data: {}", msg))
        }
        StorageError::Backend(msg) => AppError::BadGateway(msg),
        StorageError::Config(e) => AppError::InternalServerError(e.to_string()),
    }
}

struct UploadForm {
    bytes: Vec<u8>,
    content_type: String,
    name: Option<String>,
    description: Option<String>,
    main: bool,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut bytes = None;
    let mut content_type = None;
    let mut name = None;
    let mut description = None;
    let mut main = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                content_type = field.content_type().map(str::to_string);
                bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid file field: {}", e)))?
                        .to_vec(),
                );
            }
            Some("name") => name = field.text().await.ok().filter(|t| !t.is_empty()),
            Some("description") => description = field.text().await.ok().filter(|t| !t.is_empty()),
            Some("main") => {
                main = field
                    .text()
                    .await
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(false);
            }
            _ => {}
        }
    }

    let bytes = bytes.ok_or_else(|| AppError::BadRequest("Missing 'file' field".to_string()))?;

    Ok(UploadForm {
        bytes,
        content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
        name,
        description,
        main,
    })
}

/// Upload an image for a product
///
/// Stores the original and a generated thumbnail in object storage, then
/// records the image metadata on the product.
#[utoipa::path(
    post,
    path = "/{id}/images/upload",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image uploaded", body = ProductImage),
        (status = 400, description = "Missing file field or unreadable image data"),
        (status = 404, description = "Product not found"),
        (status = 502, description = "Object storage unavailable")
    )
)]
async fn upload_image(
    State(context): State<ImageContext>,
    UuidPath(id): UuidPath,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_upload_form(multipart).await?;

    // Cheap failures first: the product must exist and the bytes must
    // decode before anything reaches the bucket
    context.service.find_by_id(id, false).await?;
    let thumb = thumbnail(&form.bytes, DEFAULT_THUMBNAIL_EDGE).map_err(storage_error)?;

    let object_id = Uuid::now_v7();
    let image_path = format!("products/{}/{}", id, object_id);
    let thumbnail_path = format!("products/{}/{}_thumb.jpg", id, object_id);

    context
        .storage
        .put_object(&image_path, form.bytes, &form.content_type)
        .await
        .map_err(storage_error)?;

    if let Err(err) = context
        .storage
        .put_object(&thumbnail_path, thumb, "image/jpeg")
        .await
    {
        // Best effort: don't leave the original orphaned in the bucket
        let _ = context.storage.delete_object(&image_path).await;
        return Err(storage_error(err));
    }

    let result = context
        .service
        .add_image(
            id,
            CreateProductImage {
                name: form.name,
                description: form.description,
                image_path: image_path.clone(),
                thumbnail_path: Some(thumbnail_path.clone()),
                main: form.main,
                active: true,
            },
        )
        .await;

    let image = match result {
        Ok(image) => image,
        Err(err) => {
            let _ = context.storage.delete_object(&image_path).await;
            let _ = context.storage.delete_object(&thumbnail_path).await;
            return Err(err.into());
        }
    };

    Ok((StatusCode::CREATED, Json(image)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadParams {
    /// Fetch the thumbnail instead of the original
    #[serde(default)]
    thumbnail: bool,
}

/// Download an image binary
#[utoipa::path(
    get,
    path = "/{id}/images/{imageId}/download",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("imageId" = Uuid, Path, description = "Image ID"),
        ("thumbnail" = bool, Query, description = "Fetch the thumbnail instead of the original")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Product, image or object not found"),
        (status = 502, description = "Object storage unavailable")
    )
)]
async fn download_image(
    State(context): State<ImageContext>,
    axum::extract::Path((id, image_id)): axum::extract::Path<(Uuid, Uuid)>,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, AppError> {
    let product = context.service.find_by_id(id, false).await?;
    let image = product
        .images
        .iter()
        .find(|image| image.id == image_id)
        .ok_or_else(|| AppError::NotFound(format!("Image {} not found", image_id)))?;

    let (key, content_type) = if params.thumbnail {
        let key = image
            .thumbnail_path
            .as_deref()
            .ok_or_else(|| AppError::NotFound(format!("Image {} has no thumbnail", image_id)))?;
        (key, "image/jpeg")
    } else {
        (image.image_path.as_str(), "application/octet-stream")
    };

    let bytes = context.storage.get_object(key).await.map_err(storage_error)?;

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct PresignRequest {
    content_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct PresignResponse {
    /// URL the client PUTs the bytes to
    url: String,
    /// Object key to record on the image row afterwards
    key: String,
}

/// Presign a direct upload
///
/// Hands out a time-limited URL so large files skip this server. The
/// caller attaches the returned key via the image metadata endpoint once
/// the upload finishes.
#[utoipa::path(
    post,
    path = "/{id}/images/presign",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = PresignRequest,
    responses(
        (status = 200, description = "Presigned upload URL", body = PresignResponse),
        (status = 404, description = "Product not found"),
        (status = 502, description = "Object storage unavailable")
    )
)]
async fn presign_upload(
    State(context): State<ImageContext>,
    UuidPath(id): UuidPath,
    Json(request): Json<PresignRequest>,
) -> Result<Json<PresignResponse>, AppError> {
    // Only presign for products that exist
    context.service.find_by_id(id, false).await?;

    let key = format!("products/{}/{}", id, Uuid::now_v7());
    let url = context
        .storage
        .presigned_put_url(&key, &request.content_type)
        .await
        .map_err(storage_error)?;

    Ok(Json(PresignResponse { url, key }))
}
