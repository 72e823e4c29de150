//! Repository for the `materials` table.

use rollcall_core::types::DbId;
use sqlx::PgPool;

use crate::models::material::{CreateMaterial, Material};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, classroom_id, uploader_id, subject_name, unit_name, \
                       file_name, file_path, file_type, size_bytes, uploaded_at";

/// Provides CRUD operations for classroom materials.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Record an uploaded material, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMaterial) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials
                (classroom_id, uploader_id, subject_name, unit_name,
                 file_name, file_path, file_type, size_bytes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(input.classroom_id)
            .bind(input.uploader_id)
            .bind(&input.subject_name)
            .bind(&input.unit_name)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(&input.file_type)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }

    /// A classroom's materials, most recently uploaded first.
    pub async fn list_for_classroom(
        pool: &PgPool,
        classroom_id: DbId,
    ) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM materials
             WHERE classroom_id = $1
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(classroom_id)
            .fetch_all(pool)
            .await
    }

    /// Find a material by ID, without any access check.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
