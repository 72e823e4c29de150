//! Well-known profile role names.
//!
//! These must match the `CHECK` constraint on `users.role`.

use crate::error::CoreError;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_OWNER: &str = "owner";

const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_OWNER];

/// Validate a requested profile role.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}
