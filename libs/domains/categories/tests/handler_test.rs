//! Handler tests for the Categories domain

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_categories::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::{TestDatabase, TestDataBuilder};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_category_returns_201() {
    let db = TestDatabase::new().await;
    let repo = PgCategoryRepository::new(db.connection());
    let service = CategoryService::new(repo);
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("category_create_201");

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": builder.name("category", "root"),
                "active": true
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let category: Category = json_body(response.into_body()).await;
    assert_eq!(category.name, builder.name("category", "root"));
    assert_eq!(category.parent_id, None);
}

#[tokio::test]
async fn create_with_unknown_parent_is_400() {
    let db = TestDatabase::new().await;
    let repo = PgCategoryRepository::new(db.connection());
    let service = CategoryService::new(repo);
    let app = handlers::router(service);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "orphan",
                "parentId": uuid::Uuid::now_v7()
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn children_and_ancestors_follow_the_tree() {
    let db = TestDatabase::new().await;
    let repo = PgCategoryRepository::new(db.connection());
    let service = CategoryService::new(repo);
    let builder = TestDataBuilder::from_test_name("category_tree");

    let root = service
        .create_category(CreateCategory {
            name: builder.name("category", "root"),
            active: true,
            parent_id: None,
        })
        .await
        .unwrap();
    let middle = service
        .create_category(CreateCategory {
            name: builder.name("category", "middle"),
            active: true,
            parent_id: Some(root.id),
        })
        .await
        .unwrap();
    let leaf = service
        .create_category(CreateCategory {
            name: builder.name("category", "leaf"),
            active: true,
            parent_id: Some(middle.id),
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}/children", root.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let children: Vec<Category> = json_body(response.into_body()).await;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, middle.id);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}/ancestors", leaf.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ancestors: Vec<Category> = json_body(response.into_body()).await;
    let ids: Vec<_> = ancestors.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![middle.id, root.id]);
}

#[tokio::test]
async fn moving_root_under_descendant_is_400() {
    let db = TestDatabase::new().await;
    let repo = PgCategoryRepository::new(db.connection());
    let service = CategoryService::new(repo);
    let builder = TestDataBuilder::from_test_name("category_cycle");

    let root = service
        .create_category(CreateCategory {
            name: builder.name("category", "root"),
            active: true,
            parent_id: None,
        })
        .await
        .unwrap();
    let child = service
        .create_category(CreateCategory {
            name: builder.name("category", "child"),
            active: true,
            parent_id: Some(root.id),
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", root.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "parentId": child.id })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detaching_parent_with_explicit_null() {
    let db = TestDatabase::new().await;
    let repo = PgCategoryRepository::new(db.connection());
    let service = CategoryService::new(repo);
    let builder = TestDataBuilder::from_test_name("category_detach");

    let root = service
        .create_category(CreateCategory {
            name: builder.name("category", "root"),
            active: true,
            parent_id: None,
        })
        .await
        .unwrap();
    let child = service
        .create_category(CreateCategory {
            name: builder.name("category", "child"),
            active: true,
            parent_id: Some(root.id),
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", child.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "parentId": null })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Category = json_body(response.into_body()).await;
    assert_eq!(updated.parent_id, None);
}
