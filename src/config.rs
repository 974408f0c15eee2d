//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub graphite: GraphiteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8125
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Graphite backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GraphiteConfig {
    #[serde(default = "default_graphite_url")]
    pub url: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_graphite_timeout")]
    pub request_timeout_ms: u64,
}

fn default_graphite_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_prefix() -> String {
    "go.campaigns".to_string()
}

fn default_graphite_timeout() -> u64 {
    5000
}

impl Default for GraphiteConfig {
    fn default() -> Self {
        Self {
            url: default_graphite_url(),
            prefix: default_prefix(),
            request_timeout_ms: default_graphite_timeout(),
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("metrics-gateway").join("config.toml")),
            Some(PathBuf::from("/etc/metrics-gateway/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("METRICS_GATEWAY_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("METRICS_GATEWAY_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Graphite overrides
        if let Ok(url) = std::env::var("METRICS_GATEWAY_GRAPHITE_URL") {
            self.graphite.url = url;
        }
        if let Ok(prefix) = std::env::var("METRICS_GATEWAY_PREFIX") {
            self.graphite.prefix = prefix;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("METRICS_GATEWAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("METRICS_GATEWAY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.api.port, 8125);
        assert_eq!(config.graphite.url, "http://127.0.0.1:8080");
        assert_eq!(config.graphite.prefix, "go.campaigns");
        assert_eq!(config.graphite.request_timeout_ms, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [graphite]
            url = "http://graphite.internal:8080"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.graphite.url, "http://graphite.internal:8080");
        assert_eq!(config.graphite.prefix, "go.campaigns");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.api.port, 8125);
    }
}
