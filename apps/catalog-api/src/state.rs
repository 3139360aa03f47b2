//! Application state management

use sea_orm::DatabaseConnection;
use storage::ObjectStorage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: ObjectStorage,
}
