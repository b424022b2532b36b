//! Working directory cleanup.

use std::io;
use std::path::Path;

/// Result of a cleanup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    Removed,
    Absent,
    Failed,
}

/// Recursively remove the working directory.
///
/// Never fails: an absent directory is a warning, any other error is logged.
pub async fn remove_working_dir(dir: &Path) -> Cleanup {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {
            tracing::debug!("Removed working directory {}", dir.display());
            Cleanup::Removed
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                "Working directory {} does not exist, nothing to clean up",
                dir.display()
            );
            Cleanup::Absent
        }
        Err(e) => {
            tracing::error!("Failed to remove working directory {}: {}", dir.display(), e);
            Cleanup::Failed
        }
    }
}
