//! Repository for the `classrooms` and `enrollments` tables.

use rollcall_core::types::DbId;
use sqlx::PgPool;

use crate::models::classroom::{Classroom, EnrolledClassroom, Enrollment, OwnedClassroom};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, join_code, created_at, updated_at";

/// Same columns qualified with the `c` alias.
const C_COLUMNS: &str = "c.id, c.owner_id, c.name, c.join_code, c.created_at, c.updated_at";

/// Provides classroom CRUD and membership operations.
pub struct ClassroomRepo;

impl ClassroomRepo {
    /// Insert a new classroom, returning the created row.
    ///
    /// Fails with a `uq_classrooms_join_code` violation if the code is taken.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        name: &str,
        join_code: &str,
    ) -> Result<Classroom, sqlx::Error> {
        let query = format!(
            "INSERT INTO classrooms (owner_id, name, join_code)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Classroom>(&query)
            .bind(owner_id)
            .bind(name)
            .bind(join_code)
            .fetch_one(pool)
            .await
    }

    /// Find a classroom by ID, without any access check.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Classroom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classrooms WHERE id = $1");
        sqlx::query_as::<_, Classroom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a classroom by its join code.
    pub async fn find_by_join_code(
        pool: &PgPool,
        join_code: &str,
    ) -> Result<Option<Classroom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classrooms WHERE join_code = $1");
        sqlx::query_as::<_, Classroom>(&query)
            .bind(join_code)
            .fetch_optional(pool)
            .await
    }

    /// Classrooms owned by `owner_id`, newest first, with member counts.
    pub async fn list_owned(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<OwnedClassroom>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS}, COUNT(e.id) AS member_count
             FROM classrooms c
             LEFT JOIN enrollments e ON e.classroom_id = c.id
             WHERE c.owner_id = $1
             GROUP BY c.id
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, OwnedClassroom>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Classrooms `user_id` is enrolled in, most recently joined first.
    pub async fn list_enrolled(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EnrolledClassroom>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS}, u.display_name AS owner_name, e.enrolled_at
             FROM enrollments e
             JOIN classrooms c ON c.id = e.classroom_id
             JOIN users u ON u.id = c.owner_id
             WHERE e.user_id = $1
             ORDER BY e.enrolled_at DESC, e.id DESC"
        );
        sqlx::query_as::<_, EnrolledClassroom>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Enroll `user_id`. Fails with a `uq_enrollments_user_classroom`
    /// violation if already enrolled.
    pub async fn enroll(
        pool: &PgPool,
        user_id: DbId,
        classroom_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (user_id, classroom_id)
             VALUES ($1, $2)
             RETURNING id, user_id, classroom_id, enrolled_at",
        )
        .bind(user_id)
        .bind(classroom_id)
        .fetch_one(pool)
        .await
    }

    /// Whether `user_id` is enrolled in the classroom.
    pub async fn is_member(
        pool: &PgPool,
        user_id: DbId,
        classroom_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM enrollments WHERE user_id = $1 AND classroom_id = $2
             )",
        )
        .bind(user_id)
        .bind(classroom_id)
        .fetch_one(pool)
        .await
    }

    /// Number of enrolled members.
    pub async fn member_count(pool: &PgPool, classroom_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE classroom_id = $1")
            .bind(classroom_id)
            .fetch_one(pool)
            .await
    }
}
