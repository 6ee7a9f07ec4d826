//! # Configuration Management
//!
//! Environment-driven settings for the secret client and its logging.

pub mod settings;

pub use settings::{LoggingConfig, SecretsSettings, DEFAULT_LOAD_TIMEOUT_SECONDS, ENV_PREFIX};
