//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Default logger configuration used by the prompting entry point.
pub const DEFAULT_LOGGER_CONFIG: &str = "./config/logger.yaml";

/// Default application configuration used by the prompting entry point.
pub const DEFAULT_APP_CONFIG: &str = "./config/config.yaml";

/// Instagram profile archiver.
#[derive(Parser, Debug)]
#[command(
    name = "instagram-crawler",
    version,
    about = "Archive an Instagram profile's posts into sorted folders",
    long_about = "Downloads every post of one Instagram profile through instaloader and sorts \
                  the files into images, videos, captions and profiles folders."
)]
pub struct Args {
    /// Path to the logger configuration file.
    pub logger_config: PathBuf,

    /// Path to the application configuration file.
    pub config: PathBuf,

    /// Username of the profile to archive.
    pub username: String,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// Instagram profile archiver that asks for the username.
#[derive(Parser, Debug)]
#[command(
    name = "crawl-prompt",
    version,
    about = "Archive an Instagram profile, asking for the username",
    long_about = "Resolves the username from CRAWLER_USERNAME when running inside a container, \
                  otherwise from an interactive prompt, otherwise from --username."
)]
pub struct PromptArgs {
    /// Path to the logger configuration file.
    #[arg(long, default_value = DEFAULT_LOGGER_CONFIG)]
    pub logger_config: PathBuf,

    /// Path to the application configuration file.
    #[arg(short, long, default_value = DEFAULT_APP_CONFIG)]
    pub config: PathBuf,

    /// Username used when neither the environment nor the prompt supplies one.
    #[arg(short, long)]
    pub username: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}
