//! Handlers for classroom study materials.
//!
//! Bytes go to the [`MaterialStore`](crate::storage::MaterialStore); the
//! `materials` table keeps the metadata and the storage key.

use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rollcall_core::error::CoreError;
use rollcall_core::materials::{build_catalog, storage_key, validate_file_name};
use rollcall_core::subject::validate_name;
use rollcall_core::types::DbId;
use rollcall_db::models::material::{CreateMaterial, Material};
use rollcall_db::repositories::MaterialRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::classrooms::{load_accessible, load_owned};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Fields collected from the upload form.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, String, Vec<u8>)>,
    subject_name: Option<String>,
    unit_name: Option<String>,
}

async fn read_upload_form(multipart: &mut Multipart, max_bytes: usize) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if data.len() > max_bytes {
                    return Err(AppError::BadRequest(format!(
                        "File exceeds the {max_bytes} byte upload limit"
                    )));
                }
                form.file = Some((file_name, content_type, data.to_vec()));
            }
            "subject_name" | "unit_name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if name == "subject_name" {
                    form.subject_name = Some(text);
                } else {
                    form.unit_name = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/v1/classrooms/{id}/materials
///
/// Multipart form: `file` (required), `subject_name` (required),
/// `unit_name` (optional). Classroom owner only.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(classroom_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Material>>)> {
    load_owned(&state.pool, auth.user_id, classroom_id).await?;

    let form = read_upload_form(&mut multipart, state.config.max_upload_bytes).await?;

    let subject_name = form.subject_name.as_deref().unwrap_or("").trim().to_string();
    validate_name(&subject_name, "Subject name")?;
    let unit_name = form
        .unit_name
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    let (file_name, file_type, bytes) = form
        .file
        .ok_or_else(|| AppError::Core(CoreError::Validation("File is required.".into())))?;
    validate_file_name(&file_name)?;

    let key = storage_key(classroom_id, &Uuid::new_v4().to_string(), &file_name);
    state.material_store.put(&key, &bytes).await?;

    let input = CreateMaterial {
        classroom_id,
        uploader_id: auth.user_id,
        subject_name,
        unit_name,
        file_name,
        file_path: key.clone(),
        file_type,
        size_bytes: bytes.len() as i64,
    };
    let material = match MaterialRepo::create(&state.pool, &input).await {
        Ok(material) => material,
        Err(e) => {
            if let Err(cleanup) = state.material_store.delete(&key).await {
                tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        material_id = material.id,
        classroom_id,
        size_bytes = material.size_bytes,
        "Material uploaded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: material })))
}

/// GET /api/v1/classrooms/{id}/materials
///
/// Newest first. Owner or member.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(classroom_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Material>>>> {
    load_accessible(&state.pool, auth.user_id, classroom_id).await?;
    let materials = MaterialRepo::list_for_classroom(&state.pool, classroom_id).await?;
    Ok(Json(DataResponse { data: materials }))
}

/// GET /api/v1/classrooms/{id}/materials/catalog
///
/// Materials grouped subject -> unit -> files.
pub async fn catalog(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(classroom_id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    load_accessible(&state.pool, auth.user_id, classroom_id).await?;
    let materials = MaterialRepo::list_for_classroom(&state.pool, classroom_id).await?;

    let catalog = serde_json::to_value(build_catalog(&materials))
        .map_err(|e| AppError::InternalError(format!("Catalog serialization error: {e}")))?;
    Ok(Json(DataResponse { data: catalog }))
}

/// GET /api/v1/materials/{id}/download
pub async fn download(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let material = MaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    load_accessible(&state.pool, auth.user_id, material.classroom_id).await?;

    let bytes = state.material_store.get(&material.file_path).await?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, material.file_type.clone()),
            (
                CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    header_safe_file_name(&material.file_name)
                ),
            ),
        ],
        bytes,
    ))
}

/// Replace characters that would break a quoted header parameter.
fn header_safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
