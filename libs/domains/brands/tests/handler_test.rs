//! Handler tests for the Brands domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_brands::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::{TestDatabase, TestDataBuilder};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_brand_returns_201() {
    let db = TestDatabase::new().await;
    let repo = PgBrandRepository::new(db.connection());
    let service = BrandService::new(repo);
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("brand_create_201");

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": builder.name("brand", "main"),
                "active": true
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let brand: Brand = json_body(response.into_body()).await;
    assert_eq!(brand.name, builder.name("brand", "main"));
    assert!(brand.active);
    assert!(brand.deleted_at.is_none());
}

#[tokio::test]
async fn create_brand_validates_input() {
    let db = TestDatabase::new().await;
    let repo = PgBrandRepository::new(db.connection());
    let service = BrandService::new(repo);
    let app = handlers::router(service);

    // Empty name is rejected before the service runs
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "name": "" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_brand_roundtrip() {
    let db = TestDatabase::new().await;
    let repo = PgBrandRepository::new(db.connection());
    let service = BrandService::new(repo);
    let builder = TestDataBuilder::from_test_name("brand_get");

    let created = service
        .create_brand(CreateBrand {
            name: builder.name("brand", "get"),
            active: true,
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let brand: Brand = json_body(response.into_body()).await;
    assert_eq!(brand.id, created.id);
    assert_eq!(brand.name, created.name);
}

#[tokio::test]
async fn get_brand_rejects_malformed_uuid() {
    let db = TestDatabase::new().await;
    let repo = PgBrandRepository::new(db.connection());
    let service = BrandService::new(repo);
    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_brand_then_get_is_404() {
    let db = TestDatabase::new().await;
    let repo = PgBrandRepository::new(db.connection());
    let service = BrandService::new(repo);
    let builder = TestDataBuilder::from_test_name("brand_delete");

    let created = service
        .create_brand(CreateBrand {
            name: builder.name("brand", "gone"),
            active: true,
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Default lookup hides soft-deleted brands
    let get = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(get).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // But includeDeleted=true still finds the row
    let get_deleted = Request::builder()
        .method("GET")
        .uri(format!("/{}?includeDeleted=true", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(get_deleted).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let brand: Brand = json_body(response.into_body()).await;
    assert!(brand.deleted_at.is_some());

    // Second delete reports 404
    let delete_again = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(delete_again).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_brands_filters_by_active() {
    let db = TestDatabase::new().await;
    let repo = PgBrandRepository::new(db.connection());
    let service = BrandService::new(repo);
    let builder = TestDataBuilder::from_test_name("brand_list_active");

    service
        .create_brand(CreateBrand {
            name: builder.name("brand", "on"),
            active: true,
        })
        .await
        .unwrap();
    service
        .create_brand(CreateBrand {
            name: builder.name("brand", "off"),
            active: false,
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/?active=true")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let brands: Vec<Brand> = json_body(response.into_body()).await;
    assert!(brands.iter().all(|b| b.active));
    assert!(
        brands
            .iter()
            .any(|b| b.name == builder.name("brand", "on"))
    );
}
