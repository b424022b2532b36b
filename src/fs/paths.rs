//! Account directory layout.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fs::naming::sanitize_path_component;
use crate::media::MediaKind;

/// Default root of the archive.
pub const DEFAULT_ROOT: &str = "assets";

/// Default parent of the per-run working directory.
pub const DEFAULT_WORKING_BASE: &str = ".";

/// Destination and working directories for one target account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLayout {
    pub username: String,

    /// `<root>/<username>`
    pub account_dir: PathBuf,

    /// `<working-base>/<username>`, removed at the end of every run.
    pub working_dir: PathBuf,

    /// Destination per kind, indexed like `MediaKind::ALL`.
    targets: [PathBuf; 4],
}

impl AccountLayout {
    /// Layout with the default folder names.
    pub fn new(root: &Path, working_base: &Path, username: &str) -> Self {
        let account_dir = root.join(username);
        let targets = MediaKind::ALL.map(|kind| account_dir.join(kind.default_folder()));

        Self {
            username: username.to_string(),
            working_dir: working_base.join(username),
            account_dir,
            targets,
        }
    }

    /// Layout from `directories.*` settings.
    pub fn from_settings(settings: &Settings, username: &str) -> Result<Self> {
        let root = settings.get_path("directories.root", DEFAULT_ROOT);
        let working_base = settings.get_path("directories.working", DEFAULT_WORKING_BASE);

        let mut layout = Self::new(&root, &working_base, username);
        for (slot, kind) in layout.targets.iter_mut().zip(MediaKind::ALL) {
            let folder = settings.get_string(kind.config_key(), kind.default_folder());
            let folder = sanitize_path_component(&folder).map_err(|e| Error::ConfigValidation {
                field: kind.config_key().to_string(),
                message: e.to_string(),
            })?;
            *slot = layout.account_dir.join(folder);
        }

        let distinct = {
            let mut seen = HashSet::new();
            layout.targets.iter().all(|t| seen.insert(t))
        };
        if !distinct {
            return Err(Error::ConfigValidation {
                field: "directories.types".to_string(),
                message: "each media kind needs its own folder".to_string(),
            });
        }

        layout.check_disjoint()?;
        Ok(layout)
    }

    /// The working directory is deleted after every run, so it must not be,
    /// contain, or sit inside the account directory.
    fn check_disjoint(&self) -> Result<()> {
        let working = absolute(&self.working_dir);
        let account = absolute(&self.account_dir);

        if working.starts_with(&account) || account.starts_with(&working) {
            return Err(Error::ConfigValidation {
                field: "directories.working".to_string(),
                message: format!(
                    "working directory {} overlaps the archive directory {}",
                    self.working_dir.display(),
                    self.account_dir.display()
                ),
            });
        }
        Ok(())
    }

    /// Destination directory for a media kind.
    pub fn target_dir(&self, kind: MediaKind) -> &Path {
        let index = MediaKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.targets[index]
    }

    /// Create every destination directory. Idempotent.
    pub async fn create_directories(&self) -> Result<()> {
        for dir in &self.targets {
            ensure_dir(dir).await?;
        }
        Ok(())
    }
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| Error::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

/// Lexically normalised absolute form of `path`; symlinks are not resolved.
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
