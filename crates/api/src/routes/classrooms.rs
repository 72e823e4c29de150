//! Route definitions for the `/classrooms` resource, including the
//! classroom-scoped material routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{classrooms, materials};
use crate::state::AppState;

/// Routes mounted at `/classrooms`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create (owner role)
/// POST   /join                      -> join
/// GET    /{id}                      -> get_by_id
/// GET    /{id}/invite               -> invite
/// GET    /{id}/materials            -> materials::list
/// POST   /{id}/materials            -> materials::upload
/// GET    /{id}/materials/catalog    -> materials::catalog
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(classrooms::list).post(classrooms::create))
        .route("/join", post(classrooms::join))
        .route("/{id}", get(classrooms::get_by_id))
        .route("/{id}/invite", get(classrooms::invite))
        .route(
            "/{id}/materials",
            get(materials::list).post(materials::upload),
        )
        .route("/{id}/materials/catalog", get(materials::catalog))
}
