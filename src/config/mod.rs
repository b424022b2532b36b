//! Configuration module for the instagram-crawler.
//!
//! This module handles:
//! - Loading the settings document (YAML or TOML) and dotted-path lookups
//! - Logger configuration and subscriber setup
//! - Target username resolution and validation

pub mod logging;
pub mod settings;
pub mod source;
pub mod validation;
pub mod value;

pub use logging::{LogWriter, LoggingConfig};
pub use settings::{Lookup, Settings};
pub use source::{default_sources, detect_container, resolve_username, UsernameSource};
pub use validation::validate_username;
pub use value::{ConfigValue, FromConfigValue};
