//! Repository for the `subjects` table.

use rollcall_core::types::DbId;
use sqlx::PgPool;

use crate::models::subject::{Subject, UpdateSubject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, threshold, color, created_at, updated_at";

/// Provides CRUD operations for a user's subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        threshold: i32,
        color: &str,
    ) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (user_id, name, threshold, color)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(user_id)
            .bind(name)
            .bind(threshold)
            .bind(color)
            .fetch_one(pool)
            .await
    }

    /// List a user's subjects in creation order.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Subject>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's subjects by ID.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a subject. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no subject with the given `id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateSubject,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET
                name = COALESCE($3, name),
                threshold = COALESCE($4, threshold),
                color = COALESCE($5, color)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.threshold)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subject. Its attendance records and timetable entries go with
    /// it through `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
