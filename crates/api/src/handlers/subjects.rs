//! Handlers for the `/subjects` resource.
//!
//! Reads return each subject together with its attendance summary and the
//! status recorded on the requested day, which is what the dashboard cards
//! show.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use rollcall_core::attendance::{summarize_subject, DayIndex};
use rollcall_core::error::CoreError;
use rollcall_core::subject::{validate_name, DEFAULT_COLOR, DEFAULT_THRESHOLD};
use rollcall_core::types::DbId;
use rollcall_db::models::attendance::AttendanceRecord;
use rollcall_db::models::subject::{CreateSubject, Subject, SubjectWithSummary, UpdateSubject};
use rollcall_db::repositories::{AttendanceRepo, SubjectRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters shared by the subject reads.
#[derive(Debug, Default, Deserialize)]
pub struct TodayQuery {
    /// Day whose status is reported as `today_status`. Defaults to the
    /// server's current UTC date.
    pub today: Option<NaiveDate>,
}

impl TodayQuery {
    fn day(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subject",
        id,
    })
}

fn with_summary(
    subject: Subject,
    records: &[AttendanceRecord],
    index: &DayIndex<'_, AttendanceRecord>,
    today: NaiveDate,
) -> SubjectWithSummary {
    let summary = summarize_subject(subject.id, subject.threshold, records);
    let today_status = index.for_subject(today, subject.id).map(|r| r.status);
    SubjectWithSummary {
        subject,
        summary,
        today_status,
    }
}

/// GET /api/v1/subjects?today=YYYY-MM-DD
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> AppResult<Json<DataResponse<Vec<SubjectWithSummary>>>> {
    let subjects = SubjectRepo::list_for_user(&state.pool, auth.user_id).await?;
    let records = AttendanceRepo::list_plain_for_user(&state.pool, auth.user_id).await?;
    let index = DayIndex::build(&records);
    let today = query.day();

    let cards = subjects
        .into_iter()
        .map(|subject| with_summary(subject, &records, &index, today))
        .collect();
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/subjects/{id}?today=YYYY-MM-DD
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<TodayQuery>,
) -> AppResult<Json<DataResponse<SubjectWithSummary>>> {
    let subject = SubjectRepo::find(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let records = AttendanceRepo::list_for_subject(&state.pool, auth.user_id, id).await?;
    let index = DayIndex::build(&records);

    let card = with_summary(subject, &records, &index, query.day());
    Ok(Json(DataResponse { data: card }))
}

/// POST /api/v1/subjects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<DataResponse<Subject>>)> {
    input.validate().map_err(CoreError::from)?;
    let name = input.name.trim();
    validate_name(name, "Name")?;

    let subject = SubjectRepo::create(
        &state.pool,
        auth.user_id,
        name,
        input.threshold.unwrap_or(DEFAULT_THRESHOLD),
        input.color.as_deref().unwrap_or(DEFAULT_COLOR),
    )
    .await?;

    tracing::info!(subject_id = subject.id, user_id = auth.user_id, "Subject created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

/// PUT /api/v1/subjects/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<DataResponse<Subject>>> {
    input.validate().map_err(CoreError::from)?;
    if let Some(name) = &input.name {
        validate_name(name, "Name")?;
    }

    let subject = SubjectRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: subject }))
}

/// DELETE /api/v1/subjects/{id}
///
/// Cascades to the subject's attendance records and timetable entries.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubjectRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(subject_id = id, user_id = auth.user_id, "Subject deleted");
    Ok(StatusCode::NO_CONTENT)
}
