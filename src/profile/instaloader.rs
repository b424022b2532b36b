//! Profile access backed by the `instaloader` command-line program.
//!
//! Every operation is one child process. Nothing here speaks HTTP; login,
//! pagination and rate limiting stay inside instaloader.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tempfile::TempDir;
use tokio::process::Command;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::media::{collect_posts, CollectedPosts, Post};
use crate::output::create_spinner;
use crate::profile::access::Credentials;
use crate::profile::provider::{ProfileContext, ProfileProvider};

/// Program name looked up on `PATH` when the settings name none.
const PROGRAM_NAME: &str = "instaloader";

/// Longest stderr excerpt carried in an error.
const MAX_STDERR_LEN: usize = 500;

/// Session file name inside the session's private directory.
const SESSION_FILE: &str = "session";

/// Provider that shells out to instaloader.
#[derive(Debug, Clone)]
pub struct Instaloader {
    program: PathBuf,
}

/// A verified login, saved by instaloader into a private session file.
///
/// Only the login invocation sees the password; later invocations load the
/// session file. The file is deleted when the session is dropped.
#[derive(Debug)]
pub struct InstaloaderSession {
    username: String,
    dir: TempDir,
}

impl InstaloaderSession {
    fn session_file(&self) -> PathBuf {
        self.dir.path().join(SESSION_FILE)
    }

    fn args(&self) -> Vec<OsString> {
        vec![
            "--login".into(),
            self.username.clone().into(),
            "--sessionfile".into(),
            self.session_file().into_os_string(),
        ]
    }
}

/// A resolved profile.
#[derive(Debug)]
pub struct InstaloaderProfile {
    program: PathBuf,
    username: String,
    session: Option<InstaloaderSession>,
}

impl Instaloader {
    /// Use `program`, or find `instaloader` on `PATH`.
    pub fn new(program: Option<PathBuf>) -> Result<Self> {
        let program = match program {
            Some(path) => path,
            None => which::which(PROGRAM_NAME).map_err(|_| Error::InstaloaderNotFound)?,
        };
        tracing::debug!("Using instaloader at {}", program.display());
        Ok(Self { program })
    }

    /// Build from `crawler.instaloader`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let program = settings
            .get_opt_string("crawler.instaloader")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Self::new(program)
    }

    fn profile(&self, username: &str, session: Option<InstaloaderSession>) -> InstaloaderProfile {
        InstaloaderProfile {
            program: self.program.clone(),
            username: username.to_string(),
            session,
        }
    }
}

#[async_trait]
impl ProfileProvider for Instaloader {
    type Session = InstaloaderSession;
    type Context = InstaloaderProfile;

    async fn resolve_public(&self, username: &str) -> Result<Self::Context> {
        let profile = self.profile(username, None);
        profile.check_exists().await?;
        Ok(profile)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Self::Session> {
        let session = InstaloaderSession {
            username: credentials.username.clone(),
            dir: tempfile::tempdir()?,
        };
        let scratch = tempfile::tempdir()?;
        let mut args = session.args();
        args.push("--password".into());
        args.push(credentials.password.clone().into());
        args.extend(metadata_only_args(scratch.path()));
        args.push("--no-posts".into());
        args.push("--".into());
        args.push(credentials.username.clone().into());

        run(&self.program, args)
            .await
            .map_err(|e| Error::Authentication(format!("{}: {}", credentials.username, e)))?;

        tracing::info!("Logged in as {}", credentials.username);
        Ok(session)
    }

    async fn resolve_authenticated(
        &self,
        session: Self::Session,
        username: &str,
    ) -> Result<Self::Context> {
        let profile = self.profile(username, Some(session));
        profile.check_exists().await?;
        Ok(profile)
    }
}

impl InstaloaderProfile {
    fn session_args(&self) -> Vec<OsString> {
        self.session
            .as_ref()
            .map(InstaloaderSession::args)
            .unwrap_or_default()
    }

    /// Fetch only the profile document; fails when the profile is unknown or
    /// not visible.
    async fn check_exists(&self) -> Result<()> {
        let scratch = tempfile::tempdir()?;
        let mut args = self.session_args();
        args.extend(metadata_only_args(scratch.path()));
        args.push("--no-posts".into());
        args.push("--".into());
        args.push(self.username.clone().into());

        run(&self.program, args)
            .await
            .map_err(|e| Error::Profile(format!("{}: {}", self.username, e)))
    }

    /// Fetch every post's metadata document and parse it.
    ///
    /// A failed run still yields the posts whose metadata it wrote before
    /// failing; the failure becomes the collection's error.
    async fn fetch_posts(&self) -> CollectedPosts {
        let scratch = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                return CollectedPosts {
                    posts: Vec::new(),
                    error: Some(Error::Enumeration(e.to_string())),
                }
            }
        };
        let mut args = self.session_args();
        args.extend(metadata_only_args(scratch.path()));
        args.extend(
            [
                "--no-pictures",
                "--no-videos",
                "--no-video-thumbnails",
                "--no-captions",
                "--filename-pattern",
                "{shortcode}",
                "--",
            ]
            .map(OsString::from),
        );
        args.push(self.username.clone().into());

        let spinner = create_spinner(&format!("Fetching post list for {}...", self.username));
        let result = run(&self.program, args).await;
        spinner.finish_and_clear();

        let mut collected = collect_posts(scratch.path());
        if let Err(e) = result {
            tracing::warn!(
                "Post listing for {} stopped early after {} posts",
                self.username,
                collected.posts.len()
            );
            collected.error = Some(Error::Enumeration(e.to_string()));
        }
        tracing::info!("Found {} posts for {}", collected.posts.len(), self.username);
        collected
    }
}

#[async_trait]
impl ProfileContext for InstaloaderProfile {
    fn posts(&self) -> BoxStream<'_, Result<Post>> {
        stream::once(self.fetch_posts())
            .flat_map(|collected| {
                let posts = collected.posts.into_iter().map(Ok);
                stream::iter(posts.chain(collected.error.map(Err)))
            })
            .boxed()
    }

    async fn download_post(&self, post: &Post, target_dir: &Path) -> Result<()> {
        let mut args = self.session_args();
        args.push("--quiet".into());
        args.push("--dirname-pattern".into());
        args.push(target_dir.as_os_str().to_owned());
        args.push("--".into());
        args.push(format!("-{}", post.shortcode).into());

        run(&self.program, args)
            .await
            .map_err(|e| Error::Download {
                shortcode: post.shortcode.clone(),
                message: e.to_string(),
            })
    }
}

/// Flags shared by every metadata-only invocation.
fn metadata_only_args(dir: &Path) -> Vec<OsString> {
    vec![
        "--quiet".into(),
        "--no-profile-pic".into(),
        "--no-compress-json".into(),
        "--dirname-pattern".into(),
        dir.as_os_str().to_owned(),
    ]
}

/// Run instaloader and turn a non-zero exit status into an error.
async fn run(program: &Path, args: Vec<OsString>) -> Result<()> {
    tracing::debug!("Running {} with {} arguments", program.display(), args.len());

    let output = Command::new(program)
        .args(&args)
        .kill_on_drop(true)
        .output()
        .await?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let excerpt: String = stderr.trim().chars().take(MAX_STDERR_LEN).collect();
    Err(Error::Instaloader(format!("{} ({})", excerpt, output.status)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_program_is_used() {
        let loader = Instaloader::new(Some(PathBuf::from("/opt/bin/instaloader"))).unwrap();
        assert_eq!(loader.program, PathBuf::from("/opt/bin/instaloader"));
    }

    #[test]
    fn test_session_args_load_the_session_file_without_password() {
        let session = InstaloaderSession {
            username: "me".into(),
            dir: tempfile::tempdir().unwrap(),
        };
        let file = session.session_file().to_string_lossy().into_owned();
        let profile = InstaloaderProfile {
            program: PathBuf::from("instaloader"),
            username: "alice".into(),
            session: Some(session),
        };

        let args: Vec<_> = profile
            .session_args()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["--login".to_string(), "me".into(), "--sessionfile".into(), file]);
        assert!(!args.iter().any(|a| a == "--password"));
    }

    #[test]
    fn test_public_profile_has_no_session_args() {
        let loader = Instaloader::new(Some(PathBuf::from("instaloader"))).unwrap();
        assert!(loader.profile("alice", None).session_args().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_program_becomes_error() {
        let err = run(Path::new("false"), Vec::new()).await.unwrap_err();
        assert!(matches!(err, Error::Instaloader(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_enumeration_failure_is_single_error_item() {
        let profile = InstaloaderProfile {
            program: PathBuf::from("false"),
            username: "alice".into(),
            session: None,
        };

        let items: Vec<_> = profile.posts().collect().await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(Error::Enumeration(_))));
    }

    /// Writes an executable script standing in for instaloader.
    #[cfg(unix)]
    fn fake_instaloader(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-instaloader");
        let script = format!(
            "#!/bin/sh\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = --dirname-pattern ]; then out=\"$2\"; fi\n  shift\ndone\n{}",
            body
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_posts_fetched_before_a_failure_are_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let body = r#"
echo '{"node":{"shortcode":"P1","is_video":false,"taken_at_timestamp":1700000000},"instaloader":{"node_type":"Post"}}' > "$out/P1.json"
echo '{"node":{"shortcode":"P2","is_video":true,"taken_at_timestamp":1600000000},"instaloader":{"node_type":"Post"}}' > "$out/P2.json"
echo 'JSON Query to graphql/query: 429 Too Many Requests' >&2
exit 1
"#;
        let profile = InstaloaderProfile {
            program: fake_instaloader(tmp.path(), body),
            username: "alice".into(),
            session: None,
        };

        let items: Vec<_> = profile.posts().collect().await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap().shortcode, "P1");
        assert_eq!(items[1].as_ref().unwrap().shortcode, "P2");
        match &items[2] {
            Err(Error::Enumeration(message)) => assert!(message.contains("429")),
            other => panic!("expected enumeration error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_listing_has_no_trailing_error() {
        let tmp = tempfile::tempdir().unwrap();
        let body = r#"
echo '{"node":{"shortcode":"P1","is_video":false,"taken_at_timestamp":1700000000},"instaloader":{"node_type":"Post"}}' > "$out/P1.json"
exit 0
"#;
        let profile = InstaloaderProfile {
            program: fake_instaloader(tmp.path(), body),
            username: "alice".into(),
            session: None,
        };

        let items: Vec<_> = profile.posts().collect().await;

        assert_eq!(items.len(), 1);
        assert!(items[0].is_ok());
    }
}
