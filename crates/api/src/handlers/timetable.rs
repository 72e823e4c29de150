//! Handlers for the `/timetable` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use rollcall_core::attendance::{AttendanceStatus, DayIndex};
use rollcall_core::error::CoreError;
use rollcall_core::timetable::{
    day_of_week, entries_for_day, group_by_weekday, validate_day_of_week, validate_time_window,
    DAY_NAMES,
};
use rollcall_core::types::DbId;
use rollcall_db::models::attendance::AttendanceListParams;
use rollcall_db::models::timetable::{
    TimetableEntry, TimetableEntryInput, TimetableEntryWithSubject,
};
use rollcall_db::repositories::{AttendanceRepo, TimetableRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// Selected day; defaults to the server's current UTC date.
    pub date: Option<NaiveDate>,
}

/// One weekday column of the weekly view.
#[derive(Debug, Serialize)]
pub struct WeekdayView {
    pub day_of_week: i16,
    pub day_name: &'static str,
    pub entries: Vec<TimetableEntryWithSubject>,
}

/// A class shown on a selected day.
#[derive(Debug, Serialize)]
pub struct DayEntry {
    #[serde(flatten)]
    pub entry: TimetableEntryWithSubject,
    /// `false` for an entry from another weekday, shown because its subject
    /// has a record on this day.
    pub scheduled: bool,
    /// Status recorded for this subject on the day, if any.
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub day_of_week: i16,
    pub day_name: &'static str,
    pub entries: Vec<DayEntry>,
}

fn validate_input(input: &TimetableEntryInput) -> Result<(), CoreError> {
    input.validate()?;
    validate_day_of_week(input.day_of_week)?;
    validate_time_window(input.start_time, input.end_time)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/timetable
///
/// The whole timetable as seven weekday columns, Sunday first.
pub async fn weekly(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WeekdayView>>>> {
    let entries = TimetableRepo::list_for_user(&state.pool, auth.user_id).await?;

    let week = group_by_weekday(&entries)
        .into_iter()
        .zip(0i16..)
        .map(|(bucket, dow)| WeekdayView {
            day_of_week: dow,
            day_name: DAY_NAMES[dow as usize],
            entries: bucket.into_iter().cloned().collect(),
        })
        .collect();
    Ok(Json(DataResponse { data: week }))
}

/// POST /api/v1/timetable
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TimetableEntryInput>,
) -> AppResult<(StatusCode, Json<DataResponse<TimetableEntry>>)> {
    validate_input(&input)?;

    let entry = TimetableRepo::create(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id: input.subject_id,
        }))?;

    tracing::info!(
        entry_id = entry.id,
        subject_id = entry.subject_id,
        day_of_week = entry.day_of_week,
        "Timetable entry created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/timetable/{id}
///
/// Replaces every field of the entry.
pub async fn replace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TimetableEntryInput>,
) -> AppResult<Json<DataResponse<TimetableEntry>>> {
    validate_input(&input)?;

    let entry = TimetableRepo::replace(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TimetableEntry",
            id,
        }))?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/timetable/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TimetableRepo::delete(&state.pool, auth.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TimetableEntry",
            id,
        }))
    }
}

/// GET /api/v1/timetable/day?date=YYYY-MM-DD
///
/// Classes for one day, ordered by start time. Also lists subjects that are
/// scheduled on other weekdays but were marked on this date.
pub async fn day(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<DataResponse<DayView>>> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let weekday = day_of_week(date);

    let entries = TimetableRepo::list_for_user(&state.pool, auth.user_id).await?;
    let records = AttendanceRepo::list_for_user(
        &state.pool,
        auth.user_id,
        &AttendanceListParams {
            from: Some(date),
            to: Some(date),
            subject_id: None,
        },
    )
    .await?;
    let index = DayIndex::build(&records);
    let recorded = index.subjects_on(date);

    let day_entries = entries_for_day(&entries, date, &recorded)
        .into_iter()
        .map(|entry| DayEntry {
            scheduled: entry.entry.day_of_week == weekday,
            status: index
                .for_subject(date, entry.entry.subject_id)
                .map(|r| r.record.status),
            entry: entry.clone(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: DayView {
            date,
            day_of_week: weekday,
            day_name: DAY_NAMES[weekday as usize],
            entries: day_entries,
        },
    }))
}
