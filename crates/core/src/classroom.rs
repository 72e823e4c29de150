//! Classroom join codes and invite links.

use rand::Rng;

use crate::error::CoreError;

/// Length of generated join codes, and the minimum accepted on join.
pub const JOIN_CODE_LEN: usize = 6;

const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random join code of [`JOIN_CODE_LEN`] characters from `A-Z0-9`.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..JOIN_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..JOIN_CODE_ALPHABET.len());
            char::from(JOIN_CODE_ALPHABET[idx])
        })
        .collect()
}

/// Trim and upper-case a submitted code, rejecting ones that are too short.
pub fn normalize_join_code(raw: &str) -> Result<String, CoreError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.chars().count() < JOIN_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "Join code must be at least {JOIN_CODE_LEN} characters."
        )));
    }
    Ok(code)
}

/// Shareable link that lands on the join page for `code`.
pub fn invite_link(base_url: &str, code: &str) -> String {
    format!("{}/join/{code}", base_url.trim_end_matches('/'))
}
