//! Route definitions for the `/attendance` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// GET    /           -> list
/// PUT    /           -> upsert
/// GET    /calendar   -> calendar
/// DELETE /{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list).put(attendance::upsert))
        .route("/calendar", get(attendance::calendar))
        .route("/{id}", delete(attendance::delete))
}
