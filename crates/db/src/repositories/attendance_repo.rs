//! Repository for the `attendance_records` table.

use chrono::NaiveDate;
use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{AttendanceListParams, AttendanceRecord, AttendanceWithSubject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, subject_id, date, status, created_at, updated_at";

/// Same columns qualified with the `a` alias, plus the joined subject fields.
const JOINED_COLUMNS: &str = "a.id, a.user_id, a.subject_id, a.date, a.status, \
                              a.created_at, a.updated_at, \
                              s.name AS subject_name, s.color AS subject_color";

/// Provides CRUD operations for a user's attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Insert or overwrite the record for `(user_id, subject_id, date)`.
    ///
    /// The subject must belong to `user_id`; otherwise nothing is written and
    /// `None` is returned. An existing record for the same day keeps its `id`
    /// and only has its status replaced.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        subject_id: DbId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_records (user_id, subject_id, date, status)
             SELECT s.user_id, s.id, $3, $4
             FROM subjects s
             WHERE s.id = $2 AND s.user_id = $1
             ON CONFLICT ON CONSTRAINT uq_attendance_records_user_subject_date
             DO UPDATE SET status = EXCLUDED.status
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .bind(subject_id)
            .bind(date)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List a user's records, optionally narrowed by an inclusive date range
    /// and/or a subject, ordered by date then subject.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &AttendanceListParams,
    ) -> Result<Vec<AttendanceWithSubject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM attendance_records a
             JOIN subjects s ON s.id = a.subject_id
             WHERE a.user_id = $1
               AND ($2::date IS NULL OR a.date >= $2)
               AND ($3::date IS NULL OR a.date <= $3)
               AND ($4::bigint IS NULL OR a.subject_id = $4)
             ORDER BY a.date, a.subject_id"
        );
        sqlx::query_as::<_, AttendanceWithSubject>(&query)
            .bind(user_id)
            .bind(params.from)
            .bind(params.to)
            .bind(params.subject_id)
            .fetch_all(pool)
            .await
    }

    /// All of a user's records without the subject join, for aggregation.
    pub async fn list_plain_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records
             WHERE user_id = $1
             ORDER BY date, subject_id"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Records for one of the user's subjects.
    pub async fn list_for_subject(
        pool: &PgPool,
        user_id: DbId,
        subject_id: DbId,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records
             WHERE user_id = $1 AND subject_id = $2
             ORDER BY date"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .bind(subject_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a record. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
