//! # Structured Logging
//!
//! Span macros and subscriber setup for the tracing ecosystem.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the embedding binary. [`init_logging`] is a ready-made one.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::secrets::{Result, SecretsError};

/// Create a tracing span around a secrets operation.
///
/// Every span gets a fresh `operation_id` so the fetch and decode events of one
/// load can be correlated.
///
/// ```rust,ignore
/// let span = secrets_span!("load_secrets", "prod/api", backend = "memory");
/// ```
#[macro_export]
macro_rules! secrets_span {
    ($operation:expr, $secret_id:expr) => {
        tracing::info_span!(
            "secrets_operation",
            operation = %$operation,
            secret_id = %$secret_id,
            operation_id = %$crate::observability::logging::new_operation_id()
        )
    };
    ($operation:expr, $secret_id:expr, $($field:tt)*) => {
        tracing::info_span!(
            "secrets_operation",
            operation = %$operation,
            secret_id = %$secret_id,
            operation_id = %$crate::observability::logging::new_operation_id(),
            $($field)*
        )
    };
}

#[doc(hidden)]
pub fn new_operation_id() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}

/// Install a global fmt subscriber filtered by `config.log_level`.
///
/// `RUST_LOG`, when set, overrides the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(directives),
        Err(_) => EnvFilter::try_new(&config.log_level),
    }
    .map_err(|e| SecretsError::configuration(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.log_json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        SecretsError::configuration(format!("Failed to install tracing subscriber: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_macro_compiles() {
        let _span = secrets_span!("load_secrets", "prod/api");
        let _span = secrets_span!("load_secrets", "prod/api", backend = "memory");
    }

    #[test]
    fn test_operation_ids_are_unique() {
        assert_ne!(new_operation_id(), new_operation_id());
    }

    #[test]
    fn test_init_logging_rejects_bad_filter() {
        if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
            return;
        }
        let config = LoggingConfig {
            log_level: "info,secretsmanager=notalevel".to_string(),
            log_json: false,
        };
        let err = init_logging(&config).unwrap_err();
        assert!(err.is_configuration());
    }
}
