//! Startup pipeline shared by both binaries.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{resolve_username, validate_username, LoggingConfig, Settings, UsernameSource};
use crate::crawl::{CrawlOptions, Crawler, RunStats};
use crate::error::{exit_codes, Error, Result};
use crate::fs::AccountLayout;
use crate::output::{print_banner, print_config_summary, print_info, print_run_stats, print_warning};
use crate::profile::{Access, Instaloader};

/// Where the target username comes from.
#[derive(Debug, Clone)]
pub enum UsernameInput {
    /// Given directly on the command line.
    Given(String),
    /// Resolved from the first source that yields a value.
    Sources(Vec<UsernameSource>),
}

/// Everything needed to start a run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub logger_config: PathBuf,
    pub config: PathBuf,
    pub username: UsernameInput,
    pub debug: bool,
}

/// Initialize logging, load settings, resolve the target and crawl it.
///
/// Returns an error only for startup failures; a degraded run still ends in
/// `Ok`.
pub async fn run_crawl(request: RunRequest) -> Result<RunStats> {
    let mut logging = LoggingConfig::load(&request.logger_config)?;
    if request.debug {
        logging.level = "debug".to_string();
    }
    logging.init()?;

    let settings = Settings::load(&request.config)?;

    let username = match request.username {
        UsernameInput::Given(name) => name,
        UsernameInput::Sources(sources) => resolve_username(
            &sources,
            |var| std::env::var(var).ok(),
            &mut io::stdin().lock(),
            &mut io::stdout(),
        )?,
    };
    let username = validate_username(&username)?;

    let layout = AccountLayout::from_settings(&settings, &username)?;
    let access = Access::from_settings(&settings)?;
    let options = CrawlOptions::from_settings(&settings);
    let provider = Instaloader::from_settings(&settings)?;

    print_banner();
    print_config_summary(&username, &access.to_string(), &layout.account_dir);
    tracing::info!("Loading username {} profile...", username);

    let crawler = Crawler::new(provider, layout, access, options);
    let stats = crawler.run().await?;

    print_run_stats(&stats);
    if stats.profile_unavailable {
        print_warning(&format!("Profile {} could not be loaded, nothing was archived", username));
    } else {
        print_info(&format!("Archive written to {}", crawler.layout().account_dir.display()));
    }
    Ok(stats)
}

/// Map a startup error to the process exit status.
pub fn exit_status(error: &Error) -> i32 {
    if error.is_config() {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::UNEXPECTED_ERROR
    }
}

/// Exit code for a finished run.
pub fn exit_code(result: &Result<RunStats>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => ExitCode::from(exit_status(e) as u8),
    }
}
