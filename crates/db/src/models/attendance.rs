//! Attendance record model and DTOs.

use chrono::NaiveDate;
use rollcall_core::attendance::{AttendanceEntry, AttendanceStatus};
use rollcall_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance_records` table.
///
/// At most one row exists per `(user_id, subject_id, date)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub subject_id: DbId,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AttendanceEntry for AttendanceRecord {
    fn subject_id(&self) -> DbId {
        self.subject_id
    }

    fn day(&self) -> NaiveDate {
        self.date
    }

    fn status(&self) -> AttendanceStatus {
        self.status
    }
}

/// An attendance record joined with its subject's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceWithSubject {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub subject_name: String,
    pub subject_color: String,
}

impl AttendanceEntry for AttendanceWithSubject {
    fn subject_id(&self) -> DbId {
        self.record.subject_id
    }

    fn day(&self) -> NaiveDate {
        self.record.date
    }

    fn status(&self) -> AttendanceStatus {
        self.record.status
    }
}

/// DTO for marking attendance. Upserts on `(user, subject, date)`.
#[derive(Debug, Deserialize)]
pub struct UpsertAttendance {
    pub subject_id: DbId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Query parameters for `GET /attendance` (all optional, inclusive range).
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceListParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub subject_id: Option<DbId>,
}
