//! Username validation.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Maximum username length.
const MAX_USERNAME_LENGTH: usize = 30;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9._]+$").expect("static regex"))
}

/// Validate a target username and return it without a leading `@`.
///
/// Usernames become directory names, so anything outside letters, digits,
/// `.` and `_` is rejected.
pub fn validate_username(username: &str) -> Result<String> {
    let clean = username.trim().trim_start_matches('@');

    if clean.is_empty() {
        return Err(Error::MissingConfig("username".to_string()));
    }

    if clean.len() > MAX_USERNAME_LENGTH {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username '{}' is too long (maximum {} characters)",
                username, MAX_USERNAME_LENGTH
            ),
        });
    }

    if !username_pattern().is_match(clean) {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username '{}' contains invalid characters. Only letters, digits, '.' and '_' allowed.",
                username
            ),
        });
    }

    if clean.chars().all(|c| c == '.') {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!("Username '{}' is not a valid directory name", username),
        });
    }

    Ok(clean.to_string())
}
