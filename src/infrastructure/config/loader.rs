use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project-local config file
pub const DEFAULT_CONFIG_FILE: &str = "autolinear.yaml";

/// Environment variable carrying the Linear API key
pub const API_KEY_ENV: &str = "LINEAR_API_KEY";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Linear base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Linear profile cannot be empty")]
    EmptyProfile,

    #[error("Invalid request_timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid server path: {0}. Must start with '/'")]
    InvalidServerPath(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `autolinear.yaml` in the working directory (optional)
    /// 3. Environment variables (`AUTOLINEAR_*` prefix, `__` separates sections)
    /// 4. `LINEAR_API_KEY` for the API key
    pub fn load() -> Result<Config> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Same layering as [`load`](Self::load) with an explicit config file.
    /// A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Config> {
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("AUTOLINEAR_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            if !api_key.is_empty() {
                config.linear.api_key = Some(api_key);
            }
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// A missing API key is deliberately not checked here; it only becomes
    /// fatal when a Linear session is opened.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.linear.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.linear.profile.trim().is_empty() {
            return Err(ConfigError::EmptyProfile);
        }

        if config.linear.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                config.linear.request_timeout_secs,
            ));
        }

        if !config.server.path.starts_with('/') {
            return Err(ConfigError::InvalidServerPath(config.server.path.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Transport;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const NO_FILE: &str = "/nonexistent/autolinear.yaml";

    #[test]
    fn test_default_config_is_valid() {
        ConfigLoader::validate(&Config::default()).expect("Default config should be valid");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        temp_env::with_vars_unset(
            ["LINEAR_API_KEY", "AUTOLINEAR_SERVER__PORT"],
            || {
                let config = ConfigLoader::load_from(NO_FILE).unwrap();
                assert_eq!(config.server.port, 8001);
                assert!(config.linear.api_key.is_none());
            },
        );
    }

    #[test]
    fn test_api_key_from_environment() {
        temp_env::with_var("LINEAR_API_KEY", Some("lin_api_test"), || {
            let config = ConfigLoader::load_from(NO_FILE).unwrap();
            assert_eq!(config.linear.api_key.as_deref(), Some("lin_api_test"));
        });
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        temp_env::with_var("LINEAR_API_KEY", Some(""), || {
            let config = ConfigLoader::load_from(NO_FILE).unwrap();
            assert!(config.linear.api_key.is_none());
        });
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9000\n  transport: stdio").unwrap();

        temp_env::with_var("AUTOLINEAR_SERVER__PORT", Some("9100"), || {
            let config = ConfigLoader::load_from(file.path()).unwrap();
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.server.transport, Transport::Stdio);
        });
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.linear.request_timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_relative_server_path_rejected() {
        let mut config = Config::default();
        config.server.path = "mcp".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidServerPath(_))
        ));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = Config::default();
        config.linear.base_url = " ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }
}
