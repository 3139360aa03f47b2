//! API routes module

pub mod health;
pub mod images;

use axum::Router;
use domain_brands::{BrandService, PgBrandRepository};
use domain_categories::{CategoryService, PgCategoryRepository};
use domain_products::{PgProductRepository, ProductService};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let brands = domain_brands::handlers::router(BrandService::new(PgBrandRepository::new(
        state.db.clone(),
    )));
    let categories = domain_categories::handlers::router(CategoryService::new(
        PgCategoryRepository::new(state.db.clone()),
    ));
    let products = domain_products::handlers::router(ProductService::new(
        PgProductRepository::new(state.db.clone()),
    ));

    Router::new()
        .nest("/brands", brands)
        .nest("/categories", categories)
        .nest("/products", products.merge(images::router(state)))
        .merge(health::router(state.clone()))
}
