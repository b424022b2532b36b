//! Path component validation.

use crate::error::{Error, Result};

/// Sanitize a folder name read from the settings.
///
/// Traversal and null bytes are rejected; separators and other problematic
/// characters are replaced with underscores.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() || sanitized == "." {
        return Err(Error::InvalidFilename(format!(
            "Folder name cannot be empty: '{}'",
            name
        )));
    }

    Ok(sanitized)
}
