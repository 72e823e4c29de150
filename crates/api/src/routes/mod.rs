pub mod attendance;
pub mod auth;
pub mod classrooms;
pub mod health;
pub mod materials;
pub mod profile;
pub mod subjects;
pub mod timetable;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
///
/// /profile                                         get, update
///
/// /subjects                                        list (with summaries), create
/// /subjects/{id}                                   get, update, delete
///
/// /attendance                                      list, upsert (PUT)
/// /attendance/{id}                                 delete
/// /attendance/calendar                             status days + day records
///
/// /timetable                                       weekly view, create
/// /timetable/{id}                                  replace (PUT), delete
/// /timetable/day                                   day filter
///
/// /classrooms                                      overview, create (owner role)
/// /classrooms/join                                 join by code
/// /classrooms/{id}                                 detail
/// /classrooms/{id}/invite                          join code + link (owner)
/// /classrooms/{id}/materials                       list, upload (owner)
/// /classrooms/{id}/materials/catalog               subject/unit grouping
///
/// /materials/{id}/download                         file bytes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/subjects", subjects::router())
        .nest("/attendance", attendance::router())
        .nest("/timetable", timetable::router())
        .nest("/classrooms", classrooms::router())
        .nest("/materials", materials::router())
}
