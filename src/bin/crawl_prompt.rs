//! Instagram Crawler - entry point that asks for the username.
//!
//! Inside a container the username comes from `CRAWLER_USERNAME`; otherwise
//! the user is prompted, and `--username` is the last resort.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;

use instagram_crawler::{
    cli::{exit_code, run_crawl, PromptArgs, RunRequest, UsernameInput},
    config::{default_sources, detect_container},
    output::print_error,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = PromptArgs::parse();

    let sources = default_sources(
        detect_container(),
        std::io::stdin().is_terminal(),
        args.username,
    );

    let request = RunRequest {
        logger_config: args.logger_config,
        config: args.config,
        username: UsernameInput::Sources(sources),
        debug: args.debug,
    };

    let result = run_crawl(request).await;
    if let Err(e) = &result {
        print_error(&e.to_string());
    }
    exit_code(&result)
}
