//! Instagram Crawler - CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use instagram_crawler::{
    cli::{exit_code, run_crawl, Args, RunRequest, UsernameInput},
    output::print_error,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let request = RunRequest {
        logger_config: args.logger_config,
        config: args.config,
        username: UsernameInput::Given(args.username),
        debug: args.debug,
    };

    let result = run_crawl(request).await;
    if let Err(e) = &result {
        print_error(&e.to_string());
    }
    exit_code(&result)
}
