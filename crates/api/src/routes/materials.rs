use axum::routing::get;
use axum::Router;

use crate::handlers::materials;
use crate::state::AppState;

/// Routes mounted at `/materials`.
///
/// ```text
/// GET /{id}/download -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/download", get(materials::download))
}
