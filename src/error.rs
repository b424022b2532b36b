//! Error types for the instagram-crawler application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    // Profile access errors
    #[error("Profile not available: {0}")]
    Profile(String),

    #[error("Login failed: {0}")]
    Authentication(String),

    #[error("Post enumeration failed: {0}")]
    Enumeration(String),

    #[error("Download failed for post {shortcode}: {message}")]
    Download { shortcode: String, message: String },

    // External tool errors
    #[error("instaloader error: {0}")]
    Instaloader(String),

    #[error("instaloader not found. Please install it (pip install instaloader) and ensure it's in your PATH.")]
    InstaloaderNotFound,

    // File system errors
    #[error("Invalid path component: {0}")]
    InvalidFilename(String),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error belongs to the startup configuration class.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigParse { .. }
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::Logging(_)
        )
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_classified() {
        assert!(Error::MissingConfig("instagram.username".into()).is_config());
        assert!(Error::ConfigParse {
            path: PathBuf::from("config.yaml"),
            message: "bad indent".into(),
        }
        .is_config());
        assert!(!Error::Profile("alice".into()).is_config());
        assert!(!Error::InstaloaderNotFound.is_config());
    }

    #[test]
    fn test_download_error_message() {
        let err = Error::Download {
            shortcode: "Cxyz".into(),
            message: "exit status 1".into(),
        };
        assert_eq!(err.to_string(), "Download failed for post Cxyz: exit status 1");
    }
}
