//! Extension-based sorting of downloaded files.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use tokio::fs;

use crate::error::Result;

/// Tally of one sorting pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortOutcome {
    /// Files moved into the target directory.
    pub moved: u64,
    /// Files left in place because the target already had them.
    pub skipped: u64,
    /// Files that vanished or could not be moved.
    pub failed: u64,
}

impl SortOutcome {
    pub fn merge(&mut self, other: SortOutcome) {
        self.moved += other.moved;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Move every file of `work_dir` whose name ends with `extension` into
/// `target_dir`, keeping its name.
///
/// Existing destination files are never overwritten. Per-file failures are
/// logged and counted; only a failure to list `work_dir` is returned. A
/// missing `work_dir` sorts nothing.
pub async fn move_files(work_dir: &Path, extension: &str, target_dir: &Path) -> Result<SortOutcome> {
    let names = match matching_files(work_dir, extension).await {
        Ok(names) => names,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("Working directory {} is absent, nothing to sort", work_dir.display());
            return Ok(SortOutcome::default());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(move_listed(work_dir, &names, target_dir).await)
}

/// Move the already listed `names` from `work_dir` into `target_dir`.
async fn move_listed(work_dir: &Path, names: &[OsString], target_dir: &Path) -> SortOutcome {
    let mut outcome = SortOutcome::default();

    for name in names {
        let shown = Path::new(name).display();
        let source = work_dir.join(name);
        let destination = target_dir.join(name);

        if fs::try_exists(&destination).await.unwrap_or(false) {
            tracing::debug!("Skipping existing file: {}", destination.display());
            outcome.skipped += 1;
            continue;
        }

        match move_file(&source, &destination).await {
            Ok(()) => {
                tracing::debug!("Moved {} -> {}", shown, target_dir.display());
                outcome.moved += 1;
            }
            Err(e)
                if e.kind() == io::ErrorKind::NotFound
                    && !fs::try_exists(&source).await.unwrap_or(false) =>
            {
                tracing::error!("File {} not found, skipping.", shown);
                outcome.failed += 1;
            }
            Err(e) => {
                tracing::error!("Error moving file {}: {}", shown, e);
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// Names of regular files in `dir` ending with `extension`, sorted.
///
/// The suffix is compared on the raw name bytes, so names that are not valid
/// UTF-8 are sorted too.
async fn matching_files(dir: &Path, extension: &str) -> io::Result<Vec<OsString>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.as_encoded_bytes().ends_with(extension.as_bytes()) {
            if name.to_str().is_none() {
                tracing::warn!(
                    "File name {} is not valid UTF-8",
                    Path::new(&name).display()
                );
            }
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Rename, falling back to copy-then-delete when the rename cannot work
/// across filesystems.
async fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(e),
        Err(e) => {
            tracing::debug!("Rename of {} failed ({}), copying instead", source.display(), e);
            fs::copy(source, destination).await?;
            fs::remove_file(source).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn names_in(dir: &Path) -> BTreeSet<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    fn setup(files: &[&str]) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let work = tmp.path().join("alice");
        let target = tmp.path().join("images");
        std::fs::create_dir_all(&work).unwrap();
        std::fs::create_dir_all(&target).unwrap();
        for file in files {
            std::fs::write(work.join(file), file.as_bytes()).unwrap();
        }
        (tmp, work, target)
    }

    #[tokio::test]
    async fn test_moves_only_matching_extension() {
        let (_tmp, work, target) = setup(&["a.jpg", "b.jpg", "c.txt"]);

        let outcome = move_files(&work, ".jpg", &target).await.unwrap();

        assert_eq!(outcome.moved, 2);
        assert_eq!(outcome.failed, 0);
        assert_eq!(
            names_in(&target),
            BTreeSet::from(["a.jpg".to_string(), "b.jpg".to_string()])
        );
        assert_eq!(names_in(&work), BTreeSet::from(["c.txt".to_string()]));
    }

    #[tokio::test]
    async fn test_compound_extension_is_exact_suffix() {
        let (_tmp, work, target) =
            setup(&["2024-01-01_UTC.json.xz", "2024-01-01_UTC.json", "xz.jpg"]);

        let outcome = move_files(&work, ".json.xz", &target).await.unwrap();

        assert_eq!(outcome.moved, 1);
        assert_eq!(
            names_in(&target),
            BTreeSet::from(["2024-01-01_UTC.json.xz".to_string()])
        );
    }

    #[tokio::test]
    async fn test_existing_destination_is_not_overwritten() {
        let (_tmp, work, target) = setup(&["a.jpg"]);
        std::fs::write(target.join("a.jpg"), b"original").unwrap();

        let outcome = move_files(&work, ".jpg", &target).await.unwrap();

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.moved, 0);
        assert!(work.join("a.jpg").exists());
        assert_eq!(std::fs::read(target.join("a.jpg")).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_move_failure_is_logged_and_skipped() {
        let (tmp, work, _target) = setup(&["a.jpg", "b.jpg"]);
        let missing_target = tmp.path().join("does-not-exist");

        let outcome = move_files(&work, ".jpg", &missing_target).await.unwrap();

        assert_eq!(outcome.failed, 2);
        assert!(work.join("a.jpg").exists());
        assert!(work.join("b.jpg").exists());
    }

    #[tokio::test]
    async fn test_directories_are_not_moved() {
        let (_tmp, work, target) = setup(&["a.jpg"]);
        std::fs::create_dir(work.join("nested.jpg")).unwrap();

        let outcome = move_files(&work, ".jpg", &target).await.unwrap();

        assert_eq!(outcome.moved, 1);
        assert!(work.join("nested.jpg").is_dir());
    }

    #[tokio::test]
    async fn test_absent_work_dir_sorts_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = move_files(&tmp.path().join("gone"), ".jpg", tmp.path())
            .await
            .unwrap();
        assert_eq!(outcome, SortOutcome::default());
    }

    #[tokio::test]
    async fn test_vanished_source_reports_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = move_file(&tmp.path().join("ghost.jpg"), &tmp.path().join("out.jpg"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_file_vanishing_after_listing_is_counted_and_skipped() {
        let (_tmp, work, target) = setup(&["a.jpg", "b.jpg"]);

        let names = matching_files(&work, ".jpg").await.unwrap();
        assert_eq!(names.len(), 2);
        std::fs::remove_file(work.join("a.jpg")).unwrap();

        let outcome = move_listed(&work, &names, &target).await;

        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.moved, 1);
        assert_eq!(names_in(&target), BTreeSet::from(["b.jpg".to_string()]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_names_are_sorted() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_tmp, work, target) = setup(&[]);
        let name = OsStr::from_bytes(b"caf\xe9.jpg");
        if std::fs::write(work.join(name), b"x").is_err() {
            // Filesystems that enforce UTF-8 names cannot hold this file.
            return;
        }

        let outcome = move_files(&work, ".jpg", &target).await.unwrap();

        assert_eq!(outcome.moved, 1);
        assert!(target.join(name).exists());
        assert!(!work.join(name).exists());
    }
}
