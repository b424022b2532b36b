//! Access strategy selection.

use std::fmt;

use crate::config::Settings;
use crate::error::{Error, Result};

/// Login credentials for authenticated access.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How the target profile is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Resolve the profile from its username alone.
    Public,
    /// Log in first, then resolve the profile.
    Authenticated(Credentials),
}

impl Access {
    /// Pick the strategy from `instagram.enabled`.
    ///
    /// Credentials are only read when authenticated access is enabled.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if !settings.get_bool("instagram.enabled", false) {
            return Ok(Access::Public);
        }

        let username = settings
            .get_opt_string("instagram.username")
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| Error::MissingConfig("instagram.username".to_string()))?;
        let password = settings
            .get_opt_string("instagram.password")
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::MissingConfig("instagram.password".to_string()))?;

        Ok(Access::Authenticated(Credentials {
            username: username.trim().to_string(),
            password,
        }))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Access::Authenticated(_))
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Authenticated(c) => write!(f, "authenticated as {}", c.username),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValue;

    fn settings_from(yaml: &str) -> Settings {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        Settings::from_value(ConfigValue::from(value))
    }

    #[test]
    fn test_disabled_is_public_even_with_credentials() {
        let settings =
            settings_from("instagram:\n  enabled: false\n  username: me\n  password: secret\n");
        assert_eq!(Access::from_settings(&settings).unwrap(), Access::Public);
    }

    #[test]
    fn test_absent_flag_is_public() {
        assert_eq!(
            Access::from_settings(&Settings::default()).unwrap(),
            Access::Public
        );
    }

    #[test]
    fn test_enabled_reads_credentials() {
        let settings =
            settings_from("instagram:\n  enabled: true\n  username: me\n  password: secret\n");
        let access = Access::from_settings(&settings).unwrap();

        assert!(access.is_authenticated());
        assert_eq!(access.to_string(), "authenticated as me");
    }

    #[test]
    fn test_enabled_without_password_is_config_error() {
        let settings = settings_from("instagram:\n  enabled: true\n  username: me\n");
        let err = Access::from_settings(&settings).unwrap_err();
        assert!(matches!(err, Error::MissingConfig(ref f) if f == "instagram.password"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            username: "me".into(),
            password: "secret".into(),
        };
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
