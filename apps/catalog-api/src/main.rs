//! Catalog API - product catalog REST server

use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use storage::ObjectStorage;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = database::postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let storage = ObjectStorage::connect(config.storage.clone()).await?;

    let server_config = config.server.clone();
    let app_info = config.app.clone();

    let state = AppState {
        db: db.clone(),
        storage,
    };

    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(app_info));

    info!("Starting Catalog API on port {}", server_config.port);

    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        db.close().await.ok();
        info!("Database connection closed");
    })
    .await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
