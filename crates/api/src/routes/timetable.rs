//! Route definitions for the `/timetable` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::timetable;
use crate::state::AppState;

/// Routes mounted at `/timetable`.
///
/// ```text
/// GET    /        -> weekly
/// POST   /        -> create
/// GET    /day     -> day
/// PUT    /{id}    -> replace
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timetable::weekly).post(timetable::create))
        .route("/day", get(timetable::day))
        .route("/{id}", put(timetable::replace).delete(timetable::delete))
}
