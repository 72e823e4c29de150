//! Handlers for the `/classrooms` resource.
//!
//! Owners create classrooms and hand out join codes; members join with a
//! code. A classroom is visible only to its owner and its members.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rollcall_core::classroom::{generate_join_code, invite_link, normalize_join_code};
use rollcall_core::error::CoreError;
use rollcall_core::subject::validate_name;
use rollcall_core::types::DbId;
use rollcall_db::models::classroom::{
    Classroom, CreateClassroom, EnrolledClassroom, Enrollment, JoinClassroom, OwnedClassroom,
};
use rollcall_db::repositories::ClassroomRepo;
use serde::Serialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireOwner;
use crate::response::DataResponse;
use crate::state::AppState;

/// Attempts at finding an unused join code before giving up.
const MAX_JOIN_CODE_ATTEMPTS: usize = 5;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ClassroomsOverview {
    pub owned: Vec<OwnedClassroom>,
    pub enrolled: Vec<EnrolledClassroom>,
}

#[derive(Debug, Serialize)]
pub struct ClassroomDetail {
    #[serde(flatten)]
    pub classroom: Classroom,
    pub is_owner: bool,
    pub member_count: i64,
}

#[derive(Debug, Serialize)]
pub struct JoinedClassroom {
    pub classroom: Classroom,
    pub enrollment: Enrollment,
}

#[derive(Debug, Serialize)]
pub struct Invite {
    pub join_code: String,
    pub invite_link: String,
}

// ---------------------------------------------------------------------------
// Access helpers
// ---------------------------------------------------------------------------

/// How the caller relates to a classroom they can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Owner,
    Member,
}

/// Load a classroom the caller owns or is enrolled in.
///
/// 404 if it does not exist, 403 if the caller is neither owner nor member.
pub async fn load_accessible(
    pool: &PgPool,
    user_id: DbId,
    classroom_id: DbId,
) -> AppResult<(Classroom, Access)> {
    let classroom = ClassroomRepo::find_by_id(pool, classroom_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Classroom",
            id: classroom_id,
        }))?;

    if classroom.owner_id == user_id {
        return Ok((classroom, Access::Owner));
    }
    if ClassroomRepo::is_member(pool, user_id, classroom_id).await? {
        return Ok((classroom, Access::Member));
    }
    Err(AppError::Core(CoreError::Forbidden(
        "You are not a member of this classroom.".into(),
    )))
}

/// Load a classroom and require the caller to own it.
pub async fn load_owned(
    pool: &PgPool,
    user_id: DbId,
    classroom_id: DbId,
) -> AppResult<Classroom> {
    match load_accessible(pool, user_id, classroom_id).await? {
        (classroom, Access::Owner) => Ok(classroom),
        (_, Access::Member) => Err(AppError::Core(CoreError::Forbidden(
            "Only the classroom owner can do this.".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/classrooms
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ClassroomsOverview>>> {
    let owned = ClassroomRepo::list_owned(&state.pool, auth.user_id).await?;
    let enrolled = ClassroomRepo::list_enrolled(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: ClassroomsOverview { owned, enrolled },
    }))
}

/// POST /api/v1/classrooms
///
/// Owner role only. The join code is generated here; a collision with an
/// existing code is retried with a fresh one.
pub async fn create(
    RequireOwner(owner): RequireOwner,
    State(state): State<AppState>,
    Json(input): Json<CreateClassroom>,
) -> AppResult<(StatusCode, Json<DataResponse<Classroom>>)> {
    input.validate().map_err(CoreError::from)?;
    let name = input.name.trim();
    validate_name(name, "Classroom name")?;

    for attempt in 1..=MAX_JOIN_CODE_ATTEMPTS {
        let code = generate_join_code();
        match ClassroomRepo::create(&state.pool, owner.user_id, name, &code).await {
            Ok(classroom) => {
                tracing::info!(
                    classroom_id = classroom.id,
                    owner_id = owner.user_id,
                    "Classroom created"
                );
                return Ok((StatusCode::CREATED, Json(DataResponse { data: classroom })));
            }
            Err(e) if is_unique_violation(&e, "uq_classrooms_join_code") => {
                tracing::warn!(attempt, "Join code collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::InternalError(format!(
        "No unused join code after {MAX_JOIN_CODE_ATTEMPTS} attempts"
    )))
}

/// POST /api/v1/classrooms/join
pub async fn join(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<JoinClassroom>,
) -> AppResult<(StatusCode, Json<DataResponse<JoinedClassroom>>)> {
    let code = normalize_join_code(&input.join_code)?;

    let classroom = ClassroomRepo::find_by_join_code(&state.pool, &code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Invalid join code. No classroom found.".into(),
            ))
        })?;

    if classroom.owner_id == auth.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You already own this classroom.".into(),
        )));
    }

    let enrollment = ClassroomRepo::enroll(&state.pool, auth.user_id, classroom.id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "uq_enrollments_user_classroom") {
                AppError::Core(CoreError::Conflict(
                    "You are already enrolled in this classroom.".into(),
                ))
            } else {
                e.into()
            }
        })?;

    tracing::info!(
        classroom_id = classroom.id,
        user_id = auth.user_id,
        "Joined classroom"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: JoinedClassroom {
                classroom,
                enrollment,
            },
        }),
    ))
}

/// GET /api/v1/classrooms/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ClassroomDetail>>> {
    let (classroom, access) = load_accessible(&state.pool, auth.user_id, id).await?;
    let member_count = ClassroomRepo::member_count(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ClassroomDetail {
            classroom,
            is_owner: access == Access::Owner,
            member_count,
        },
    }))
}

/// GET /api/v1/classrooms/{id}/invite
pub async fn invite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Invite>>> {
    let classroom = load_owned(&state.pool, auth.user_id, id).await?;
    let invite_link = invite_link(&state.config.public_base_url, &classroom.join_code);
    Ok(Json(DataResponse {
        data: Invite {
            join_code: classroom.join_code,
            invite_link,
        },
    }))
}
