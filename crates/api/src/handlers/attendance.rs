//! Handlers for the `/attendance` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use rollcall_core::attendance::{DayIndex, StatusDays};
use rollcall_core::error::CoreError;
use rollcall_core::types::DbId;
use rollcall_db::models::attendance::{
    AttendanceListParams, AttendanceRecord, AttendanceWithSubject, UpsertAttendance,
};
use rollcall_db::repositories::AttendanceRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /attendance/calendar`.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Selected day; defaults to the server's current UTC date.
    pub date: Option<NaiveDate>,
}

/// Calendar view: which days carry which status, plus the selected day's
/// records.
#[derive(Debug, Serialize)]
pub struct CalendarView {
    pub date: NaiveDate,
    pub days: StatusDays,
    pub records: Vec<AttendanceWithSubject>,
}

/// GET /api/v1/attendance?from=&to=&subject_id=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AttendanceListParams>,
) -> AppResult<Json<DataResponse<Vec<AttendanceWithSubject>>>> {
    if let (Some(from), Some(to)) = (params.from, params.to) {
        if from > to {
            return Err(AppError::Core(CoreError::Validation(
                "`from` must not be after `to`".into(),
            )));
        }
    }
    let records = AttendanceRepo::list_for_user(&state.pool, auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: records }))
}

/// PUT /api/v1/attendance
///
/// Marks a subject for a day. An existing record for the same
/// `(subject, date)` is overwritten.
pub async fn upsert(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertAttendance>,
) -> AppResult<Json<DataResponse<AttendanceRecord>>> {
    let record = AttendanceRepo::upsert(
        &state.pool,
        auth.user_id,
        input.subject_id,
        input.date,
        input.status,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Subject",
        id: input.subject_id,
    }))?;

    tracing::info!(
        record_id = record.id,
        subject_id = record.subject_id,
        date = %record.date,
        status = %record.status,
        "Attendance marked"
    );
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/attendance/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AttendanceRepo::delete(&state.pool, auth.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "AttendanceRecord",
            id,
        }))
    }
}

/// GET /api/v1/attendance/calendar?date=YYYY-MM-DD
pub async fn calendar(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<DataResponse<CalendarView>>> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let records = AttendanceRepo::list_for_user(
        &state.pool,
        auth.user_id,
        &AttendanceListParams::default(),
    )
    .await?;
    let index = DayIndex::build(&records);

    let view = CalendarView {
        date,
        days: index.status_days(),
        records: index.on(date).iter().map(|r| (*r).clone()).collect(),
    };
    Ok(Json(DataResponse { data: view }))
}
