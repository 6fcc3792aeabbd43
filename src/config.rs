//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::DashboardOptions;
use crate::metrics::MetricsConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Analytics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

/// Persisted session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_landing_location")]
    pub landing_location: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("revboard").to_string_lossy().to_string())
        .unwrap_or_else(|| "./revboard_data".to_string())
}

fn default_landing_location() -> String {
    "index.html".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            landing_location: default_landing_location(),
        }
    }
}

impl SessionConfig {
    /// Data directory with a leading `~/` resolved against the home directory
    pub fn data_dir_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

fn default_daily_limit() -> u32 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        Self::load_from(Some(path), &[], env_var)
    }

    /// Load from default locations or environment. A config file that
    /// exists but cannot be read or parsed is an error, not a fallback.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from(None, &Self::default_paths(), env_var)
    }

    /// Candidate config files, first existing one wins
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("revboard").join("config.toml")),
            Some(PathBuf::from("./revboard.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load `explicit`, else the first existing `candidates` entry, else
    /// defaults; then apply overrides looked up through `env`
    pub fn load_from(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| candidates.iter().find(|p| p.exists()).cloned());

        let mut config = match path {
            Some(path) => {
                let mut config = Self::load(&path)?;
                config.source = Some(path);
                config
            }
            None => Config::default(),
        };

        config.apply_env_overrides_from(env);
        Ok(config)
    }

    /// Command-line overrides, applied last
    pub fn with_cli_overrides(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api.base_url = url;
        }
        self
    }

    /// Options handed to the dashboard controller
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            landing_location: self.session.landing_location.clone(),
            daily_limit: self.dashboard.daily_limit,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(env_var);
    }

    fn apply_env_overrides_from(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env("REVBOARD_API_URL") {
            self.api.base_url = url;
        }

        if let Some(data_dir) = env("REVBOARD_DATA_DIR") {
            self.session.data_dir = data_dir;
        }

        if let Some(level) = env("REVBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = env("REVBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Revboard Configuration
#
# Environment variables override these settings:
# - REVBOARD_API_URL
# - REVBOARD_DATA_DIR
# - REVBOARD_LOG_LEVEL
# - REVBOARD_LOG_FORMAT

[api]
# Analytics API origin
base_url = "http://127.0.0.1:8000"

# Request timeout in seconds (unset waits indefinitely)
# request_timeout_secs = 30

[session]
# Directory holding the stored identity
# (default: the platform's local data directory + "/revboard")
# data_dir = "~/.local/share/revboard"

# Where logout sends the user
landing_location = "index.html"

[dashboard]
# Days requested by the daily revenue chart
daily_limit = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_map(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert!(config.api.request_timeout_secs.is_none());
        assert_eq!(config.session.landing_location, "index.html");
        assert_eq!(config.dashboard.daily_limit, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.session.data_dir, default_data_dir());
        assert_eq!(config.dashboard_options(), DashboardOptions::default());
    }

    #[test]
    fn test_data_dir_path() {
        let session = SessionConfig {
            data_dir: "/var/lib/revboard".to_string(),
            landing_location: default_landing_location(),
        };
        assert_eq!(session.data_dir_path(), PathBuf::from("/var/lib/revboard"));

        if let Some(home) = dirs::home_dir() {
            let session = SessionConfig {
                data_dir: "~/.local/share/revboard".to_string(),
                landing_location: default_landing_location(),
            };
            assert_eq!(session.data_dir_path(), home.join(".local/share/revboard"));
        }
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(
            r#"
[api]
base_url = "http://analytics.internal:9000"
request_timeout_secs = 10
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://analytics.internal:9000");
        assert_eq!(config.api.metrics_config().request_timeout_secs, Some(10));
        assert_eq!(config.dashboard.daily_limit, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nbase_url = 1").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_each_env_variable_overrides() {
        let cases: [(&str, fn(&Config) -> &str); 4] = [
            ("REVBOARD_API_URL", |c| c.api.base_url.as_str()),
            ("REVBOARD_DATA_DIR", |c| c.session.data_dir.as_str()),
            ("REVBOARD_LOG_LEVEL", |c| c.logging.level.as_str()),
            ("REVBOARD_LOG_FORMAT", |c| c.logging.format.as_str()),
        ];

        for (key, field) in cases {
            let config = Config::load_from(None, &[], env_map(&[(key, "from-env")])).unwrap();
            assert_eq!(field(&config), "from-env", "{} not applied", key);
            assert!(config.source.is_none());
        }
    }

    #[test]
    fn test_env_overrides_file_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("revboard.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://from-file:8000"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let env = env_map(&[("REVBOARD_API_URL", "http://from-env:8000")]);
        let config = Config::load_from(Some(&path), &[], env).unwrap();

        assert_eq!(config.api.base_url, "http://from-env:8000");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_cli_url_beats_env_and_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("revboard.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://from-file:8000\"\n").unwrap();

        let env = env_map(&[("REVBOARD_API_URL", "http://from-env:8000")]);
        let config = Config::load_from(Some(&path), &[], env)
            .unwrap()
            .with_cli_overrides(Some("http://from-cli:8000".to_string()));
        assert_eq!(config.api.base_url, "http://from-cli:8000");

        let config = Config::default().with_cli_overrides(None);
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_first_existing_candidate_is_loaded() {
        let dir = tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let present = dir.path().join("present.toml");
        std::fs::write(&present, "[dashboard]\ndaily_limit = 7\n").unwrap();

        let config = Config::load_from(None, &[absent, present.clone()], env_map(&[])).unwrap();
        assert_eq!(config.dashboard.daily_limit, 7);
        assert_eq!(config.source, Some(present));
    }

    #[test]
    fn test_no_candidate_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let candidates = [dir.path().join("a.toml"), dir.path().join("b.toml")];

        let config = Config::load_from(None, &candidates, env_map(&[])).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.dashboard.daily_limit, 30);
    }

    #[test]
    fn test_broken_candidate_is_an_error() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("revboard.toml");
        std::fs::write(&broken, "[api\nbase_url = 1").unwrap();

        let result = Config::load_from(None, &[broken.clone()], env_map(&[]));
        match result {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected parse error, got {:?}", other.map(|c| c.source)),
        }

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load_from(Some(&missing), &[], env_map(&[])),
            Err(ConfigError::Io { .. })
        ));
    }
}
