//! Target username resolution for the prompting entry point.
//!
//! The username is resolved once, at startup, by walking an explicit list of
//! sources in order. The first source that yields a non-empty value wins.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable holding the target username inside containers.
pub const USERNAME_ENV_VAR: &str = "CRAWLER_USERNAME";

/// Marker file created by Docker in every container.
const DOCKER_MARKER: &str = "/.dockerenv";

/// Control-group metadata of the current process.
const CGROUP_FILE: &str = "/proc/self/cgroup";

/// A place the target username can come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameSource {
    /// Read the named environment variable.
    Environment(String),
    /// Ask on the terminal.
    Prompt,
    /// A value given on the command line.
    Argument(String),
}

/// Build the source precedence list: environment (containers only), prompt
/// (interactive sessions only), then the command-line value.
pub fn default_sources(
    in_container: bool,
    interactive: bool,
    argument: Option<String>,
) -> Vec<UsernameSource> {
    let mut sources = Vec::new();
    if in_container {
        sources.push(UsernameSource::Environment(USERNAME_ENV_VAR.to_string()));
    }
    if interactive {
        sources.push(UsernameSource::Prompt);
    }
    if let Some(arg) = argument {
        sources.push(UsernameSource::Argument(arg));
    }
    sources
}

/// Walk `sources` in order and return the first non-empty username.
pub fn resolve_username<E, R, W>(
    sources: &[UsernameSource],
    env: E,
    input: &mut R,
    output: &mut W,
) -> Result<String>
where
    E: Fn(&str) -> Option<String>,
    R: BufRead,
    W: Write,
{
    for source in sources {
        let candidate = match source {
            UsernameSource::Environment(var) => env(var),
            UsernameSource::Prompt => {
                write!(output, "Enter Instagram's username: ")?;
                output.flush()?;
                let mut line = String::new();
                input.read_line(&mut line)?;
                Some(line)
            }
            UsernameSource::Argument(value) => Some(value.clone()),
        };

        if let Some(name) = candidate.map(|c| c.trim().to_string()) {
            if !name.is_empty() {
                tracing::debug!("Username resolved from {:?}", source);
                return Ok(name);
            }
        }
    }

    Err(Error::MissingConfig(format!(
        "username (set {}, answer the prompt, or pass --username)",
        USERNAME_ENV_VAR
    )))
}

/// Detect whether the process runs inside a container.
pub fn detect_container() -> bool {
    if Path::new(DOCKER_MARKER).exists() {
        return true;
    }

    fs::read_to_string(CGROUP_FILE)
        .map(|text| cgroup_indicates_container(&text))
        .unwrap_or(false)
}

/// Check control-group metadata for container runtime markers.
pub fn cgroup_indicates_container(cgroup: &str) -> bool {
    cgroup.lines().any(|line| {
        line.contains("docker") || line.contains("kubepods") || line.contains("containerd")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_sources_order() {
        let sources = default_sources(true, true, Some("bob".into()));
        assert_eq!(
            sources,
            vec![
                UsernameSource::Environment(USERNAME_ENV_VAR.into()),
                UsernameSource::Prompt,
                UsernameSource::Argument("bob".into()),
            ]
        );

        assert_eq!(default_sources(false, false, None), vec![]);
    }

    #[test]
    fn test_environment_wins_over_prompt() {
        let sources = default_sources(true, true, None);
        let env = |var: &str| (var == USERNAME_ENV_VAR).then(|| "alice".to_string());
        let mut input = Cursor::new("mallory\n");
        let mut output = Vec::new();

        let name = resolve_username(&sources, env, &mut input, &mut output).unwrap();
        assert_eq!(name, "alice");
        assert!(output.is_empty());
    }

    #[test]
    fn test_prompt_reads_trimmed_line() {
        let sources = default_sources(false, true, Some("fallback".into()));
        let mut input = Cursor::new("  carol \n");
        let mut output = Vec::new();

        let name = resolve_username(&sources, no_env, &mut input, &mut output).unwrap();
        assert_eq!(name, "carol");
        assert_eq!(String::from_utf8(output).unwrap(), "Enter Instagram's username: ");
    }

    #[test]
    fn test_empty_prompt_falls_through_to_argument() {
        let sources = default_sources(true, true, Some("dave".into()));
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();

        let name = resolve_username(&sources, no_env, &mut input, &mut output).unwrap();
        assert_eq!(name, "dave");
    }

    #[test]
    fn test_no_source_yields_missing_config() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let err = resolve_username(&[], no_env, &mut input, &mut output).unwrap_err();
        assert!(matches!(err, Error::MissingConfig(_)));
    }

    #[test]
    fn test_cgroup_detection() {
        assert!(cgroup_indicates_container(
            "12:memory:/docker/3f2a1b\n0::/system.slice"
        ));
        assert!(cgroup_indicates_container("0::/kubepods/besteffort/pod1"));
        assert!(!cgroup_indicates_container("0::/user.slice/user-1000.slice"));
    }
}
