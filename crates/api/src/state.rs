use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::MaterialStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rollcall_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object store holding uploaded material bytes.
    pub material_store: Arc<dyn MaterialStore>,
}
