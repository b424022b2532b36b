//! Crawl orchestration for one target account.

use futures::StreamExt;

use crate::config::Settings;
use crate::crawl::state::RunStats;
use crate::error::Result;
use crate::fs::{move_files, remove_working_dir, AccountLayout};
use crate::media::{MediaKind, Post};
use crate::profile::{Access, ProfileContext, ProfileProvider};

/// Behaviour switches of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlOptions {
    /// End the post loop at the first post that fails to download or sort.
    /// When false, the failing post is logged and the next one is processed.
    pub stop_on_error: bool,
}

impl CrawlOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            stop_on_error: settings.get_bool("crawler.stop_on_error", false),
        }
    }
}

/// Downloads one account's posts and sorts them into the account layout.
pub struct Crawler<P: ProfileProvider> {
    provider: P,
    layout: AccountLayout,
    access: Access,
    options: CrawlOptions,
}

impl<P: ProfileProvider> Crawler<P> {
    pub fn new(provider: P, layout: AccountLayout, access: Access, options: CrawlOptions) -> Self {
        Self {
            provider,
            layout,
            access,
            options,
        }
    }

    pub fn layout(&self) -> &AccountLayout {
        &self.layout
    }

    /// Run the crawl: create directories, acquire the profile, process every
    /// post, remove the working directory.
    ///
    /// Only directory creation failures are returned; profile, enumeration,
    /// per-post and per-file problems are logged and tallied.
    pub async fn run(&self) -> Result<RunStats> {
        let mut stats = RunStats::new(&self.layout.username);

        self.layout.create_directories().await?;

        match self.acquire_context().await {
            Some(context) => self.download_posts(&context, &mut stats).await,
            None => stats.profile_unavailable = true,
        }

        stats.cleanup = Some(remove_working_dir(&self.layout.working_dir).await);
        Ok(stats)
    }

    /// Resolve the profile with the configured access strategy.
    async fn acquire_context(&self) -> Option<P::Context> {
        let username = &self.layout.username;
        tracing::info!("Loading profile {} ({} access)...", username, self.access);

        let resolved = match &self.access {
            Access::Public => self.provider.resolve_public(username).await,
            Access::Authenticated(credentials) => match self.provider.login(credentials).await {
                Ok(session) => self.provider.resolve_authenticated(session, username).await,
                Err(e) => Err(e),
            },
        };

        match resolved {
            Ok(context) => Some(context),
            Err(e) => {
                tracing::error!("Could not load profile {}: {}", username, e);
                None
            }
        }
    }

    async fn download_posts(&self, context: &P::Context, stats: &mut RunStats) {
        let mut posts = context.posts();

        while let Some(item) = posts.next().await {
            let post = match item {
                Ok(post) => post,
                Err(e) => {
                    tracing::error!(
                        "Post enumeration for {} stopped: {}",
                        self.layout.username,
                        e
                    );
                    stats.enumeration_failed = true;
                    break;
                }
            };

            stats.posts_seen += 1;
            match self.process_post(context, &post, stats).await {
                Ok(()) => stats.posts_processed += 1,
                Err(e) => {
                    tracing::error!("Failed to process post {}: {}", post.label(), e);
                    stats.posts_failed += 1;
                    if self.options.stop_on_error {
                        tracing::warn!("Skipping remaining posts after failure");
                        break;
                    }
                }
            }
        }
    }

    /// Download one post into the working directory and sort its files.
    async fn process_post(
        &self,
        context: &P::Context,
        post: &Post,
        stats: &mut RunStats,
    ) -> Result<()> {
        tracing::debug!("Downloading post {}", post.label());
        context.download_post(post, &self.layout.working_dir).await?;

        for &kind in MediaKind::for_post(post.is_video) {
            let outcome = move_files(
                &self.layout.working_dir,
                kind.extension(),
                self.layout.target_dir(kind),
            )
            .await?;
            stats.record_sort(kind, outcome);
        }

        Ok(())
    }
}
