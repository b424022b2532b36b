//! Generic configuration tree and typed coercion.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Get a child value by key if this is a mapping.
    pub fn child(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Short name of the variant, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Sequence(items) => write!(f, "<sequence of {}>", items.len()),
            ConfigValue::Mapping(map) => write!(f, "<mapping of {}>", map.len()),
        }
    }
}

impl From<serde_yaml::Value> for ConfigValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            Value::Mapping(map) => ConfigValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), ConfigValue::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => ConfigValue::from(tagged.value),
        }
    }
}

/// Render a YAML mapping key as a string (`1: x` and `true: x` are legal YAML).
fn yaml_key(key: serde_yaml::Value) -> String {
    match ConfigValue::from(key) {
        ConfigValue::String(s) => s,
        other => other.to_string(),
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => ConfigValue::String(s),
            Value::Integer(i) => ConfigValue::Integer(i),
            Value::Float(x) => ConfigValue::Float(x),
            Value::Boolean(b) => ConfigValue::Bool(b),
            Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            Value::Table(table) => ConfigValue::Mapping(
                table
                    .into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Conversion from a configuration value into a concrete type.
///
/// Returns `None` when the value cannot be coerced; callers then fall back to
/// their default.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue) -> Option<Self>;
}

impl FromConfigValue for ConfigValue {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Bool(_) | ConfigValue::Integer(_) | ConfigValue::Float(_) => {
                Some(value.to_string())
            }
            _ => None,
        }
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Integer(0) => Some(false),
            ConfigValue::Integer(1) => Some(true),
            ConfigValue::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Integer(i) => Some(*i),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Float(x) => Some(*x),
            ConfigValue::Integer(i) => Some(*i as f64),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromConfigValue for PathBuf {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(s) if !s.is_empty() => Some(PathBuf::from(s)),
            _ => None,
        }
    }
}

impl FromConfigValue for Vec<String> {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Sequence(items) => items.iter().map(String::from_config_value).collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_coercion_renders_scalars() {
        assert_eq!(
            String::from_config_value(&ConfigValue::Integer(42)).as_deref(),
            Some("42")
        );
        assert_eq!(
            String::from_config_value(&ConfigValue::Bool(true)).as_deref(),
            Some("true")
        );
        assert!(String::from_config_value(&ConfigValue::Null).is_none());
        assert!(String::from_config_value(&ConfigValue::Sequence(vec![])).is_none());
    }

    #[test]
    fn test_bool_coercion() {
        let yes = ConfigValue::String("Yes".into());
        let off = ConfigValue::String("off".into());
        let junk = ConfigValue::String("maybe".into());

        assert_eq!(bool::from_config_value(&yes), Some(true));
        assert_eq!(bool::from_config_value(&off), Some(false));
        assert_eq!(bool::from_config_value(&ConfigValue::Integer(1)), Some(true));
        assert_eq!(bool::from_config_value(&ConfigValue::Integer(7)), None);
        assert_eq!(bool::from_config_value(&junk), None);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(
            i64::from_config_value(&ConfigValue::String(" 12 ".into())),
            Some(12)
        );
        assert_eq!(i64::from_config_value(&ConfigValue::Float(1.5)), None);
        assert_eq!(f64::from_config_value(&ConfigValue::Integer(3)), Some(3.0));
    }

    #[test]
    fn test_yaml_conversion_handles_non_string_keys() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\nname: x").unwrap();
        let value = ConfigValue::from(yaml);

        assert_eq!(value.child("1"), Some(&ConfigValue::String("one".into())));
        assert!(value.child("true").is_some());
        assert_eq!(value.child("name"), Some(&ConfigValue::String("x".into())));
    }

    #[test]
    fn test_toml_conversion() {
        let toml: toml::Value = toml::from_str("[directories]\nroot = \"archive\"\n").unwrap();
        let value = ConfigValue::from(toml);

        let root = value.child("directories").and_then(|d| d.child("root"));
        assert_eq!(root, Some(&ConfigValue::String("archive".into())));
    }
}
