pub use sea_orm_migration::prelude::*;

mod m20250310_000000_bootstrap;
mod m20250310_000001_create_brands;
mod m20250310_000002_create_categories;
mod m20250310_000003_create_products;
mod m20250310_000004_create_product_images;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000000_bootstrap::Migration),
            Box::new(m20250310_000001_create_brands::Migration),
            Box::new(m20250310_000002_create_categories::Migration),
            Box::new(m20250310_000003_create_products::Migration),
            Box::new(m20250310_000004_create_product_images::Migration),
        ]
    }
}
