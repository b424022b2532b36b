//! Crawl module.
//!
//! This module provides:
//! - The per-account crawl orchestrator
//! - Run statistics

pub mod orchestrator;
pub mod state;

pub use orchestrator::{CrawlOptions, Crawler};
pub use state::RunStats;
