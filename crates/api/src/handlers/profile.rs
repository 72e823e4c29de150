//! Handlers for the caller's own profile.

use axum::extract::State;
use axum::Json;
use rollcall_core::error::CoreError;
use rollcall_core::subject::validate_name;
use rollcall_db::models::user::ProfileResponse;
use rollcall_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /profile`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub display_name: String,
}

/// GET /api/v1/profile
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/profile
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let display_name = input.display_name.trim();
    validate_name(display_name, "Display name")?;

    let user = UserRepo::update_display_name(&state.pool, auth.user_id, display_name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: user.into() }))
}
