//! Readiness endpoint
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`; this
//! adds `/ready`, which actually pings the database.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::run_health_checks;
use serde_json::Value;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    run_health_checks(vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )])
    .await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
