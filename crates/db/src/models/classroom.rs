//! Classroom and enrollment models and DTOs.

use rollcall_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `classrooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Classroom {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub join_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A classroom the caller owns, with its enrollment count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OwnedClassroom {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub classroom: Classroom,
    pub member_count: i64,
}

/// A classroom the caller is enrolled in, with the owner's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrolledClassroom {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub classroom: Classroom,
    pub owner_name: Option<String>,
    pub enrolled_at: Timestamp,
}

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub user_id: DbId,
    pub classroom_id: DbId,
    pub enrolled_at: Timestamp,
}

/// DTO for creating a classroom. The join code is generated server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassroom {
    #[validate(length(min = 2, message = "Classroom name must be at least 2 characters."))]
    pub name: String,
}

/// DTO for joining a classroom by code.
#[derive(Debug, Deserialize)]
pub struct JoinClassroom {
    pub join_code: String,
}
