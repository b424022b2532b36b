//! Application settings loading and dotted-path lookup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::value::{ConfigValue, FromConfigValue};
use crate::error::{Error, Result};

/// Outcome of a typed settings lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The path exists and its value was coerced.
    Found(T),
    /// The path exists but its value could not be coerced; the default was used.
    Fallback(T),
    /// The path does not exist; the default was used.
    Default(T),
}

impl<T> Lookup<T> {
    /// Unwrap the carried value regardless of how it was obtained.
    pub fn into_inner(self) -> T {
        match self {
            Lookup::Found(v) | Lookup::Fallback(v) | Lookup::Default(v) => v,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Read-only settings document addressed by dotted paths.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    root: ConfigValue,
    source: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a YAML or TOML file.
    ///
    /// `.toml` files are parsed as TOML; everything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let root = parse_document(path, &content)?;
        tracing::debug!("Loaded settings from {}", path.display());

        Ok(Self {
            root,
            source: Some(path.to_path_buf()),
        })
    }

    /// Build settings from an already parsed tree.
    pub fn from_value(root: ConfigValue) -> Self {
        Self { root, source: None }
    }

    /// File the settings were loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Walk the document along a dot-separated path.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        path.split('.')
            .try_fold(&self.root, |node, key| node.child(key))
    }

    /// Typed lookup with a default.
    pub fn lookup<T: FromConfigValue>(&self, path: &str, default: T) -> Lookup<T> {
        let Some(value) = self.get(path) else {
            return Lookup::Default(default);
        };

        match T::from_config_value(value) {
            Some(v) => Lookup::Found(v),
            None => {
                tracing::debug!(
                    "Setting '{}' has uncoercible {} value '{}', using default",
                    path,
                    value.kind(),
                    value
                );
                Lookup::Fallback(default)
            }
        }
    }

    pub fn get_string(&self, path: &str, default: &str) -> String {
        self.lookup(path, default.to_string()).into_inner()
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.lookup(path, default).into_inner()
    }

    pub fn get_i64(&self, path: &str, default: i64) -> i64 {
        self.lookup(path, default).into_inner()
    }

    pub fn get_path(&self, path: &str, default: &str) -> PathBuf {
        self.lookup(path, PathBuf::from(default)).into_inner()
    }

    /// String lookup without a default; `None` when absent or not a scalar.
    pub fn get_opt_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(String::from_config_value)
    }
}

/// Parse a configuration document, picking the format from the file extension.
pub(crate) fn parse_document(path: &Path, content: &str) -> Result<ConfigValue> {
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let parse_error = |message: String| Error::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    if is_toml {
        let value: toml::Value = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        Ok(value.into())
    } else {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        Ok(value.into())
    }
}
