//! Logger configuration file and `tracing` subscriber setup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Error, Result};

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogWriter {
    Stdout,
    #[default]
    Stderr,
}

/// Logger configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level (trace, debug, info, warn, error).
    #[serde(default = "default_level")]
    pub level: String,

    /// Extra filter directives, e.g. `instagram_crawler::fs=debug`.
    #[serde(default)]
    pub directives: Vec<String>,

    /// Whether to print the event target.
    #[serde(default)]
    pub target: bool,

    /// Whether to colour output.
    #[serde(default = "default_true")]
    pub ansi: bool,

    #[serde(default)]
    pub writer: LogWriter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directives: Vec::new(),
            target: false,
            ansi: true,
            writer: LogWriter::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl LoggingConfig {
    /// Load the logger configuration from a YAML or TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Logging(format!(
                "cannot read logger configuration {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let parsed = if is_toml {
            toml::from_str::<LoggingConfig>(content).map_err(|e| e.to_string())
        } else if content.trim().is_empty() {
            Ok(LoggingConfig::default())
        } else {
            serde_yaml::from_str::<LoggingConfig>(content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| Error::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Build the event filter. `RUST_LOG` wins when it is set and valid.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }

        let mut filter_spec = self.level.clone();
        for directive in &self.directives {
            filter_spec.push(',');
            filter_spec.push_str(directive);
        }

        EnvFilter::try_new(&filter_spec)
            .map_err(|e| Error::Logging(format!("invalid filter '{}': {}", filter_spec, e)))
    }

    /// Install the global subscriber.
    pub fn init(&self) -> Result<()> {
        let filter = self.env_filter()?;
        let builder = fmt()
            .with_env_filter(filter)
            .with_target(self.target)
            .with_ansi(self.ansi);

        let result = match self.writer {
            LogWriter::Stdout => builder.with_writer(std::io::stdout).try_init(),
            LogWriter::Stderr => builder.with_writer(std::io::stderr).try_init(),
        };

        result.map_err(|e| Error::Logging(e.to_string()))
    }
}
