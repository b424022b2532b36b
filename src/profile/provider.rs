//! Profile access seam.
//!
//! The scraping library owns authentication, pagination and rate limiting.
//! The crawler only needs these operations from it.

use std::path::Path;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::media::Post;
use crate::profile::access::Credentials;

/// Entry point into the scraping library.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Logged-in session. Owned by whoever resolves the profile with it.
    type Session: Send;

    /// Handle on one account's posts.
    type Context: ProfileContext;

    /// Resolve a profile by username without logging in.
    async fn resolve_public(&self, username: &str) -> Result<Self::Context>;

    /// Log in with the given credentials.
    async fn login(&self, credentials: &Credentials) -> Result<Self::Session>;

    /// Resolve a profile through a logged-in session.
    async fn resolve_authenticated(
        &self,
        session: Self::Session,
        username: &str,
    ) -> Result<Self::Context>;
}

/// A resolved profile.
#[async_trait]
pub trait ProfileContext: Send + Sync {
    /// Lazily enumerate the profile's posts. An `Err` item ends enumeration.
    fn posts(&self) -> BoxStream<'_, Result<Post>>;

    /// Download one post's files into `target_dir`.
    async fn download_post(&self, post: &Post, target_dir: &Path) -> Result<()>;
}
