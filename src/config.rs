//! Control utility configuration loaded from environment variables.
//!
//! Every setting has a default matching a stock local client, can be set
//! in the environment (or a `.env` file via `dotenvy`), and can be
//! overridden on the command line.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::cli::Cli;
use crate::domain::GroupPolicy;
use crate::error::CtlError;

/// Default control endpoint host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default control endpoint port.
pub const DEFAULT_PORT: u16 = 7396;
/// Path of the client's WebSocket API.
pub const API_PATH: &str = "/api/websocket";
/// Default per-step network timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Address of the client's WebSocket control endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or IP literal.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Creates an endpoint for `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Full `ws://` URL of the control API.
    #[must_use]
    pub fn url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("ws://[{}]:{}{API_PATH}", self.host, self.port)
        } else {
            format!("ws://{}:{}{API_PATH}", self.host, self.port)
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Output format of diagnostic logs on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}` (expected text or json)")),
        }
    }
}

/// Top-level configuration.
///
/// Loaded once at startup via [`CtlConfig::from_env`], then adjusted with
/// [`CtlConfig::with_overrides`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtlConfig {
    /// Control endpoint of the client.
    pub endpoint: Endpoint,

    /// Timeout applied to connect, receive and send individually.
    pub timeout: Duration,

    /// Handling of groups missing from the client state.
    pub group_policy: GroupPolicy,

    /// Diagnostic log format.
    pub log_format: LogFormat,
}

impl Default for CtlConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            group_policy: GroupPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl CtlConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`CtlError::Config`] if `FAHCTL_UNKNOWN_GROUP` or
    /// `FAHCTL_LOG_FORMAT` holds an unrecognized value.
    pub fn from_env() -> Result<Self, CtlError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Numeric settings fall back to their defaults on missing or invalid
    /// values, and a zero timeout counts as invalid. Enumerated settings
    /// must parse when present.
    ///
    /// # Errors
    ///
    /// Returns [`CtlError::Config`] for an unrecognized group policy or
    /// log format.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CtlError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("FAHCTL_HOST")
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "FAHCTL_PORT", DEFAULT_PORT);
        let timeout_secs = match parse_or(&lookup, "FAHCTL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS) {
            0 => DEFAULT_TIMEOUT_SECS,
            secs => secs,
        };

        let group_policy = lookup("FAHCTL_UNKNOWN_GROUP")
            .map(|v| v.parse::<GroupPolicy>())
            .transpose()
            .map_err(CtlError::Config)?
            .unwrap_or_default();

        let log_format = lookup("FAHCTL_LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .transpose()
            .map_err(CtlError::Config)?
            .unwrap_or_default();

        Ok(Self {
            endpoint: Endpoint::new(host, port),
            timeout: Duration::from_secs(timeout_secs),
            group_policy,
            log_format,
        })
    }

    /// Applies command-line options on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(host) = &cli.host {
            self.endpoint.host.clone_from(host);
        }
        if let Some(port) = cli.port {
            self.endpoint.port = port;
        }
        if let Some(secs) = cli.timeout {
            self.timeout = Duration::from_secs(secs);
        }
        if cli.allow_unknown_group {
            self.group_policy = GroupPolicy::Pass;
        }
        self
    }
}

/// Parses a setting as `T`, returning `default` on missing or invalid
/// values.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CtlConfig, CtlError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CtlConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_target_local_client() {
        let Ok(config) = load(&[]) else {
            panic!("empty environment must load");
        };
        assert_eq!(config, CtlConfig::default());
        assert_eq!(
            config.endpoint.url(),
            "ws://127.0.0.1:7396/api/websocket"
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn reads_all_variables() {
        let Ok(config) = load(&[
            ("FAHCTL_HOST", "fah.local"),
            ("FAHCTL_PORT", "8000"),
            ("FAHCTL_TIMEOUT_SECS", "2"),
            ("FAHCTL_UNKNOWN_GROUP", "pass"),
            ("FAHCTL_LOG_FORMAT", "json"),
        ]) else {
            panic!("valid environment must load");
        };
        assert_eq!(config.endpoint, Endpoint::new("fah.local", 8000));
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.group_policy, GroupPolicy::Pass);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let Ok(config) = load(&[("FAHCTL_PORT", "http"), ("FAHCTL_TIMEOUT_SECS", "-1")]) else {
            panic!("numeric fallbacks must load");
        };
        assert_eq!(config.endpoint.port, DEFAULT_PORT);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let Ok(config) = load(&[("FAHCTL_TIMEOUT_SECS", "0")]) else {
            panic!("zero timeout must load");
        };
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn invalid_policy_is_config_error() {
        let result = load(&[("FAHCTL_UNKNOWN_GROUP", "maybe")]);
        assert!(matches!(result, Err(CtlError::Config(_))));
    }

    #[test]
    fn invalid_log_format_is_config_error() {
        let result = load(&[("FAHCTL_LOG_FORMAT", "xml")]);
        assert!(matches!(result, Err(CtlError::Config(_))));
    }

    #[test]
    fn ipv6_hosts_are_bracketed() {
        assert_eq!(
            Endpoint::new("::1", 7396).url(),
            "ws://[::1]:7396/api/websocket"
        );
        assert_eq!(
            Endpoint::new("[::1]", 7396).url(),
            "ws://[::1]:7396/api/websocket"
        );
    }

    #[test]
    fn cli_overrides_environment() {
        let Ok(cli) = Cli::try_parse_args([
            "fahctl",
            "--host",
            "10.0.0.2",
            "--port",
            "9000",
            "--timeout",
            "1",
            "--allow-unknown-group",
            "pause",
            "gpu",
        ]) else {
            panic!("valid arguments must parse");
        };
        let config = CtlConfig::default().with_overrides(&cli);
        assert_eq!(config.endpoint, Endpoint::new("10.0.0.2", 9000));
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.group_policy, GroupPolicy::Pass);
    }
}
