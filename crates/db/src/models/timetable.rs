//! Timetable entry model and DTOs.

use chrono::NaiveTime;
use rollcall_core::timetable::ScheduledClass;
use rollcall_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `timetable_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub subject_id: DbId,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: i16,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A timetable entry joined with its subject's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntryWithSubject {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: TimetableEntry,
    pub subject_name: String,
    pub subject_color: String,
}

impl ScheduledClass for TimetableEntryWithSubject {
    fn subject_id(&self) -> DbId {
        self.entry.subject_id
    }

    fn day_of_week(&self) -> i16 {
        self.entry.day_of_week
    }

    fn start_time(&self) -> Option<NaiveTime> {
        self.entry.start_time
    }
}

/// DTO for creating or replacing a timetable entry.
///
/// `PUT` replaces every field, so omitting a time clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct TimetableEntryInput {
    pub subject_id: DbId,
    #[validate(range(min = 0, max = 6, message = "day_of_week must be between 0 and 6."))]
    pub day_of_week: i16,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}
