//! CLI module.

pub mod args;
pub mod run;

pub use args::{Args, PromptArgs};
pub use run::{exit_code, exit_status, run_crawl, RunRequest, UsernameInput};
