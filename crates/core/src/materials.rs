//! Study-material catalog grouping and storage key rules.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Unit label for materials uploaded without one.
pub const DEFAULT_UNIT: &str = "General";

/// Longest accepted original file name.
pub const MAX_FILE_NAME_LEN: usize = 255;

/// Read access to the fields the catalog needs.
pub trait CatalogItem {
    fn subject_name(&self) -> &str;
    fn unit_name(&self) -> Option<&str>;
}

/// One subject in the catalog with its units in first-seen order.
#[derive(Debug, Serialize)]
pub struct CatalogSubject<'a, T> {
    pub subject_name: &'a str,
    pub units: Vec<CatalogUnit<'a, T>>,
}

#[derive(Debug, Serialize)]
pub struct CatalogUnit<'a, T> {
    pub unit_name: &'a str,
    pub materials: Vec<&'a T>,
}

/// Group materials as subject -> unit -> files.
///
/// Subjects and units keep the order in which they first appear in
/// `materials`; a missing or blank unit falls under [`DEFAULT_UNIT`].
pub fn build_catalog<T: CatalogItem>(materials: &[T]) -> Vec<CatalogSubject<'_, T>> {
    let mut catalog: Vec<CatalogSubject<'_, T>> = Vec::new();
    for material in materials {
        let unit_name = effective_unit(material.unit_name());

        let subject_idx = match catalog
            .iter()
            .position(|s| s.subject_name == material.subject_name())
        {
            Some(idx) => idx,
            None => {
                catalog.push(CatalogSubject {
                    subject_name: material.subject_name(),
                    units: Vec::new(),
                });
                catalog.len() - 1
            }
        };
        let units = &mut catalog[subject_idx].units;

        match units.iter_mut().find(|u| u.unit_name == unit_name) {
            Some(unit) => unit.materials.push(material),
            None => units.push(CatalogUnit {
                unit_name,
                materials: vec![material],
            }),
        }
    }
    catalog
}

fn effective_unit(unit: Option<&str>) -> &str {
    match unit.map(str::trim) {
        Some(u) if !u.is_empty() => u,
        _ => DEFAULT_UNIT,
    }
}

/// Validate an uploaded file's original name.
pub fn validate_file_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("File is required.".into()));
    }
    if name.len() > MAX_FILE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "File name must be at most {MAX_FILE_NAME_LEN} bytes"
        )));
    }
    Ok(())
}

/// Extension of `file_name`, lower-cased, if it has a usable one.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Storage key for a material: `{classroom_id}/{object_id}[.{ext}]`.
///
/// The original file name never appears in the key, so user input cannot
/// steer the object outside its classroom prefix.
pub fn storage_key(classroom_id: DbId, object_id: &str, file_name: &str) -> String {
    match file_extension(file_name) {
        Some(ext) => format!("{classroom_id}/{object_id}.{ext}"),
        None => format!("{classroom_id}/{object_id}"),
    }
}
