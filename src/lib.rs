//! Instagram Crawler - archive an Instagram profile's posts into sorted folders.
//!
//! The scraping itself (login, pagination, rate limiting) is delegated to
//! instaloader. This crate resolves settings, drives the per-post downloads
//! and sorts the downloaded files by extension.
//!
//! # Features
//!
//! - Public or authenticated profile access
//! - Dotted-path settings lookups over YAML or TOML documents
//! - Extension-based sorting into images, videos, captions and profiles
//! - Best-effort runs: failures are logged, the working directory is always
//!   cleaned up
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use instagram_crawler::{AccountLayout, Access, CrawlOptions, Crawler, Instaloader, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load(Path::new("config/config.yaml"))?;
//!     let layout = AccountLayout::from_settings(&settings, "natgeo")?;
//!     let crawler = Crawler::new(
//!         Instaloader::from_settings(&settings)?,
//!         layout,
//!         Access::from_settings(&settings)?,
//!         CrawlOptions::from_settings(&settings),
//!     );
//!
//!     let stats = crawler.run().await?;
//!     println!("{} posts archived", stats.posts_processed);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod profile;

// Re-exports for convenience
pub use config::{Lookup, Settings};
pub use crawl::{CrawlOptions, Crawler, RunStats};
pub use error::{Error, Result};
pub use fs::{move_files, AccountLayout, SortOutcome};
pub use media::{MediaKind, Post};
pub use profile::{Access, Instaloader, ProfileContext, ProfileProvider};
