//! Subject field rules and defaults.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::error::CoreError;

/// Threshold applied when a subject is created without one.
pub const DEFAULT_THRESHOLD: i32 = 75;

/// Colour applied when a subject is created without one.
pub const DEFAULT_COLOR: &str = "#6366f1";

/// Minimum length for subject, classroom and display names.
pub const MIN_NAME_LEN: usize = 2;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("static regex is valid"));

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// `validator` hook for `#[validate(custom(function = ...))]` on colour fields.
pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color").with_message("Must be a valid hex color".into()))
    }
}

/// Validate a name after trimming surrounding whitespace.
pub fn validate_name(name: &str, field: &str) -> Result<(), CoreError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {MIN_NAME_LEN} characters."
        )));
    }
    Ok(())
}
