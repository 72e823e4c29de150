//! Subject entity model and DTOs.

use rollcall_core::attendance::{AttendanceStatus, AttendanceSummary};
use rollcall_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Minimum acceptable attendance percentage (0-100).
    pub threshold: i32,
    /// `#rrggbb` display colour.
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Subject card: the row plus its attendance summary and the status recorded
/// for the requested "today", if any.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectWithSummary {
    #[serde(flatten)]
    pub subject: Subject,
    pub summary: AttendanceSummary,
    pub today_status: Option<AttendanceStatus>,
}

/// DTO for creating a new subject. Missing threshold / colour fall back to
/// the defaults in `rollcall_core::subject`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubject {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: String,
    #[validate(range(min = 0, max = 100, message = "Threshold must be between 0 and 100."))]
    pub threshold: Option<i32>,
    #[validate(custom(function = "rollcall_core::subject::hex_color"))]
    pub color: Option<String>,
}

/// DTO for updating an existing subject. All fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubject {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Threshold must be between 0 and 100."))]
    pub threshold: Option<i32>,
    #[validate(custom(function = "rollcall_core::subject::hex_color"))]
    pub color: Option<String>,
}
