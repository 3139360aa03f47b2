//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog backend: brands, categories, products and product images",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/api/brands", api = domain_brands::handlers::ApiDoc),
        (path = "/api/categories", api = domain_categories::handlers::ApiDoc),
        (path = "/api/products", api = domain_products::handlers::ApiDoc),
        (path = "/api/products", api = crate::api::images::ApiDoc)
    )
)]
pub struct ApiDoc;
