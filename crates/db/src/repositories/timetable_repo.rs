//! Repository for the `timetable_entries` table.

use rollcall_core::types::DbId;
use sqlx::PgPool;

use crate::models::timetable::{TimetableEntry, TimetableEntryInput, TimetableEntryWithSubject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, subject_id, day_of_week, start_time, end_time, created_at, updated_at";

/// Provides CRUD operations for a user's timetable.
pub struct TimetableRepo;

impl TimetableRepo {
    /// Add an entry for one of the user's subjects.
    ///
    /// Returns `None` when the subject does not belong to `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &TimetableEntryInput,
    ) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!(
            "INSERT INTO timetable_entries (user_id, subject_id, day_of_week, start_time, end_time)
             SELECT s.user_id, s.id, $3, $4, $5
             FROM subjects s
             WHERE s.id = $2 AND s.user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(user_id)
            .bind(input.subject_id)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_optional(pool)
            .await
    }

    /// The user's whole timetable with subject display fields, in insertion
    /// order.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TimetableEntryWithSubject>, sqlx::Error> {
        sqlx::query_as::<_, TimetableEntryWithSubject>(
            "SELECT t.id, t.user_id, t.subject_id, t.day_of_week, t.start_time, t.end_time,
                    t.created_at, t.updated_at,
                    s.name AS subject_name, s.color AS subject_color
             FROM timetable_entries t
             JOIN subjects s ON s.id = t.subject_id
             WHERE t.user_id = $1
             ORDER BY t.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Replace every field of an entry.
    ///
    /// Returns `None` when the entry is not the user's or the new subject is
    /// not the user's.
    pub async fn replace(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &TimetableEntryInput,
    ) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE timetable_entries SET
                subject_id = $3,
                day_of_week = $4,
                start_time = $5,
                end_time = $6
             WHERE id = $1 AND user_id = $2
               AND EXISTS (SELECT 1 FROM subjects WHERE id = $3 AND user_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.subject_id)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timetable_entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
