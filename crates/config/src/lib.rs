//! Configuration loading, validation, and path-prefix detection for the
//! Drift client.
//!
//! Loads configuration from `~/.drift/config.toml` with environment
//! variable overrides. The client itself never reads the environment; only
//! [`ClientConfig::load`] does, on behalf of front ends like the CLI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Host of the hosted gateway. The gateway rewrites paths itself, so
/// requests sent to it omit the `/api/v1` prefix.
pub const HOSTED_GATEWAY_HOST: &str = "api.driftos.dev";

/// Base URL of the hosted gateway.
pub const HOSTED_GATEWAY_URL: &str = "https://api.driftos.dev";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Whether operation paths keep their `/api/v1` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathPrefixMode {
    /// Self-hosted service: paths are sent as `/api/v1/...`.
    WithPrefix,
    /// Hosted gateway: the `/api/v1` prefix is stripped.
    NoPrefix,
}

/// Connection settings for the routing service.
///
/// Maps directly to `~/.drift/config.toml`. Treated as immutable once a
/// client has been built from it.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service base URL; a trailing `/` is stripped
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent as `Authorization`, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Hard per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Explicit hosted-mode override; detected from `base_url` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted: Option<bool>,
}

fn default_base_url() -> String {
    HOSTED_GATEWAY_URL.into()
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_ms", &self.timeout_ms)
            .field("hosted", &self.hosted)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            hosted: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
        .normalized()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Force hosted (`true`) or self-hosted (`false`) path handling.
    pub fn with_hosted(mut self, hosted: bool) -> Self {
        self.hosted = Some(hosted);
        self
    }

    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Classify the deployment.
    ///
    /// An explicit `hosted` setting wins. Otherwise the prefix is dropped iff
    /// the base URL's host is the hosted gateway.
    pub fn path_prefix_mode(&self) -> PathPrefixMode {
        let hosted = self.hosted.unwrap_or_else(|| {
            url::Url::parse(&self.base_url)
                .ok()
                .and_then(|u| u.host_str().map(|h| h == HOSTED_GATEWAY_HOST))
                .unwrap_or(false)
        });
        if hosted {
            PathPrefixMode::NoPrefix
        } else {
            PathPrefixMode::WithPrefix
        }
    }

    /// Strip trailing slashes from the base URL.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.len() != self.base_url.len() {
            self.base_url = trimmed.to_string();
        }
        self
    }

    /// Load configuration from the default path (~/.drift/config.toml).
    ///
    /// Environment variables override file values:
    /// - `DRIFT_BASE_URL`
    /// - `DRIFT_API_KEY`
    /// - `DRIFT_TIMEOUT_MS`
    /// - `DRIFT_HOSTED` (`true`/`false`)
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Apply `DRIFT_*` overrides read through `lookup`, then re-validate.
    ///
    /// All or nothing: on error `self` is left untouched.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let mut next = self.clone();

        if let Some(base_url) = lookup("DRIFT_BASE_URL") {
            next.base_url = base_url;
        }
        if let Some(api_key) = lookup("DRIFT_API_KEY").filter(|k| !k.is_empty()) {
            next.api_key = Some(api_key);
        }
        if let Some(raw) = lookup("DRIFT_TIMEOUT_MS") {
            next.timeout_ms = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("DRIFT_TIMEOUT_MS is not an integer: {raw}"))
            })?;
        }
        if let Some(raw) = lookup("DRIFT_HOSTED") {
            next.hosted = Some(parse_bool(&raw).ok_or_else(|| {
                ConfigError::ValidationError(format!("DRIFT_HOSTED is not a boolean: {raw}"))
            })?);
        }

        let next = next.normalized();
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".drift")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url must not be empty".into(),
            ));
        }

        let url = url::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::ValidationError(format!("base_url is not a valid URL ({e}): {}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for drift_core::Error {
    fn from(e: ConfigError) -> Self {
        drift_core::Error::config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ClientConfig::new("http://localhost:3000//");
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn hosted_gateway_host_drops_prefix() {
        let config = ClientConfig::new("https://api.driftos.dev/");
        assert_eq!(config.path_prefix_mode(), PathPrefixMode::NoPrefix);
    }

    #[test]
    fn other_hosts_keep_prefix() {
        for url in [
            "http://localhost:3000",
            "https://drift.internal.example.com",
            "https://api.driftos.dev.evil.example",
        ] {
            assert_eq!(
                ClientConfig::new(url).path_prefix_mode(),
                PathPrefixMode::WithPrefix,
                "{url}"
            );
        }
    }

    #[test]
    fn explicit_override_beats_detection() {
        let hosted_url = ClientConfig::new(HOSTED_GATEWAY_URL).with_hosted(false);
        assert_eq!(hosted_url.path_prefix_mode(), PathPrefixMode::WithPrefix);

        let local = ClientConfig::new("http://localhost:3000").with_hosted(true);
        assert_eq!(local.path_prefix_mode(), PathPrefixMode::NoPrefix);
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ClientConfig::new("http://localhost:3000").with_timeout_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_url_rejected() {
        assert!(ClientConfig::new("ftp://example.com").validate().is_err());
        assert!(ClientConfig::new("not a url").validate().is_err());
        assert!(ClientConfig::new("").validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::new("http://localhost:3000").with_api_key("sk-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = ClientConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.base_url, HOSTED_GATEWAY_URL);
    }

    #[test]
    fn config_file_is_parsed_and_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
base_url = "http://localhost:3000/"
api_key = "k-123"
timeout_ms = 2500
hosted = false
"#,
        )
        .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.hosted, Some(false));
    }

    #[test]
    fn malformed_config_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [").unwrap();
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn invalid_values_in_file_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_ms = 0").unwrap();
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ClientConfig::default();
        config
            .apply_overrides(env(&[
                ("DRIFT_BASE_URL", "http://127.0.0.1:8080/"),
                ("DRIFT_API_KEY", "env-key"),
                ("DRIFT_TIMEOUT_MS", "1500"),
                ("DRIFT_HOSTED", "yes"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.timeout_ms, 1500);
        assert_eq!(config.path_prefix_mode(), PathPrefixMode::NoPrefix);
    }

    #[test]
    fn bad_env_values_rejected() {
        let mut config = ClientConfig::default();
        assert!(config
            .apply_overrides(env(&[("DRIFT_TIMEOUT_MS", "soon")]))
            .is_err());
        assert!(config
            .apply_overrides(env(&[("DRIFT_HOSTED", "maybe")]))
            .is_err());
    }

    #[test]
    fn failed_overrides_leave_config_untouched() {
        let mut config = ClientConfig::new("http://localhost:3000").with_api_key("file-key");
        let before = format!("{config:?}");

        let result = config.apply_overrides(env(&[
            ("DRIFT_BASE_URL", "http://other:9000"),
            ("DRIFT_API_KEY", "env-key"),
            ("DRIFT_TIMEOUT_MS", "soon"),
        ]));
        assert!(result.is_err());
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(format!("{config:?}"), before);

        let result = config.apply_overrides(env(&[("DRIFT_BASE_URL", "ftp://nope")]));
        assert!(result.is_err());
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn default_toml_roundtrips() {
        let toml_str = ClientConfig::default_toml();
        assert!(toml_str.contains("api.driftos.dev"));
        let parsed: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn config_error_converts_to_core_error() {
        let err: drift_core::Error = ConfigError::ValidationError("bad".into()).into();
        assert!(matches!(err, drift_core::Error::Config { .. }));
    }
}
