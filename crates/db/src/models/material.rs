//! Study material metadata model and DTOs.

use rollcall_core::materials::CatalogItem;
use rollcall_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `materials` table. The bytes live in the material store
/// under `file_path`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub classroom_id: DbId,
    pub uploader_id: DbId,
    pub subject_name: String,
    pub unit_name: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub size_bytes: i64,
    pub uploaded_at: Timestamp,
}

impl CatalogItem for Material {
    fn subject_name(&self) -> &str {
        &self.subject_name
    }

    fn unit_name(&self) -> Option<&str> {
        self.unit_name.as_deref()
    }
}

/// DTO for recording an uploaded material. Built by the upload handler once
/// the bytes are stored.
#[derive(Debug)]
pub struct CreateMaterial {
    pub classroom_id: DbId,
    pub uploader_id: DbId,
    pub subject_name: String,
    pub unit_name: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub size_bytes: i64,
}
