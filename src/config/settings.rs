//! # Configuration Settings
//!
//! Settings for locating the secret bundle and for logging, read from
//! `SECRETSMANAGER_*` environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::secrets::{Result, SecretStoreHandle};

/// Prefix shared by every environment variable this crate reads.
pub const ENV_PREFIX: &str = "SECRETSMANAGER";

/// Default bound on a single backend fetch.
pub const DEFAULT_LOAD_TIMEOUT_SECONDS: u64 = 30;

fn default_load_timeout_seconds() -> u64 {
    DEFAULT_LOAD_TIMEOUT_SECONDS
}

/// Where to find the secret bundle and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SecretsSettings {
    /// Deployment environment tag, e.g. `staging`
    #[validate(length(min = 1, message = "Environment cannot be empty"))]
    pub environment: String,

    /// Application secret group key
    #[validate(length(min = 1, message = "Secret key cannot be empty"))]
    pub secret_key: String,

    /// Region override; the provider's discovery chain is used when unset
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint override for the secret store API
    #[serde(default)]
    #[validate(url(message = "Endpoint URL must be a valid URL"))]
    pub endpoint_url: Option<String>,

    /// Load timeout in seconds (0 = no timeout)
    #[serde(default = "default_load_timeout_seconds")]
    #[validate(range(max = 300, message = "Load timeout must be at most 300 seconds"))]
    pub load_timeout_seconds: u64,
}

impl SecretsSettings {
    pub fn new(environment: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            secret_key: secret_key.into(),
            region: None,
            endpoint_url: None,
            load_timeout_seconds: DEFAULT_LOAD_TIMEOUT_SECONDS,
        }
    }

    /// Load settings from `SECRETSMANAGER_*` environment variables, after
    /// reading an optional `.env` file.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            debug!(error = %e, "No .env file loaded");
        }
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_source(source: config::Environment) -> Result<Self> {
        let settings: Self = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Validate::validate(&settings)?;
        Ok(settings)
    }

    /// Identifier of the secret bundle, `<environment>/<secret_key>`.
    pub fn handle(&self) -> SecretStoreHandle {
        SecretStoreHandle::new(&self.environment, &self.secret_key)
    }

    /// Get load timeout as Duration (None if 0)
    pub fn load_timeout(&self) -> Option<Duration> {
        if self.load_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.load_timeout_seconds))
        }
    }
}

/// Log output settings for binaries that call
/// [`init_logging`](crate::observability::init_logging).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Filter directives, e.g. `info` or `secretsmanager=debug`
    #[serde(default = "default_log_level")]
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), log_json: false }
    }
}

impl LoggingConfig {
    /// Load from `SECRETSMANAGER_LOG_LEVEL` and `SECRETSMANAGER_LOG_JSON`.
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_source(source: config::Environment) -> Result<Self> {
        let logging: Self = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Validate::validate(&logging)?;
        Ok(logging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_source(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_settings_from_source() {
        let settings = SecretsSettings::from_source(env_source(&[
            ("SECRETSMANAGER_ENVIRONMENT", "staging"),
            ("SECRETSMANAGER_SECRET_KEY", "billing"),
            ("SECRETSMANAGER_REGION", "eu-west-1"),
            ("SECRETSMANAGER_LOAD_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();

        assert_eq!(settings.environment, "staging");
        assert_eq!(settings.secret_key, "billing");
        assert_eq!(settings.region.as_deref(), Some("eu-west-1"));
        assert_eq!(settings.load_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.handle().as_str(), "staging/billing");
    }

    #[test]
    fn test_settings_defaults() {
        let settings = SecretsSettings::from_source(env_source(&[
            ("SECRETSMANAGER_ENVIRONMENT", "dev"),
            ("SECRETSMANAGER_SECRET_KEY", "app"),
        ]))
        .unwrap();

        assert!(settings.region.is_none());
        assert!(settings.endpoint_url.is_none());
        assert_eq!(settings.load_timeout_seconds, DEFAULT_LOAD_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_missing_secret_key_is_configuration_error() {
        let err = SecretsSettings::from_source(env_source(&[("SECRETSMANAGER_ENVIRONMENT", "dev")]))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validation() {
        let mut settings = SecretsSettings::new("", "app");
        assert!(Validate::validate(&settings).is_err());

        settings.environment = "dev".to_string();
        assert!(Validate::validate(&settings).is_ok());

        settings.endpoint_url = Some("not a url".to_string());
        assert!(Validate::validate(&settings).is_err());

        settings.endpoint_url = Some("http://localhost:4566".to_string());
        settings.load_timeout_seconds = 301;
        assert!(Validate::validate(&settings).is_err());
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let mut settings = SecretsSettings::new("dev", "app");
        settings.load_timeout_seconds = 0;
        assert!(settings.load_timeout().is_none());
    }

    #[test]
    fn test_logging_config() {
        let logging = LoggingConfig::from_source(env_source(&[
            ("SECRETSMANAGER_LOG_LEVEL", "debug"),
            ("SECRETSMANAGER_LOG_JSON", "true"),
        ]))
        .unwrap();
        assert_eq!(logging.log_level, "debug");
        assert!(logging.log_json);

        let defaults = LoggingConfig::from_source(env_source(&[])).unwrap();
        assert_eq!(defaults.log_level, "info");
        assert!(!defaults.log_json);
    }
}
