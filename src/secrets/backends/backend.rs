//! Secret store backend trait and types
//!
//! Defines the narrow interface the cached client uses to reach a secret store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::secrets::types::SecretPayload;

/// Result type for backend calls.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Type of secret store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretBackendType {
    /// AWS Secrets Manager
    AwsSecretsManager,
    /// In-process map (development and tests)
    Memory,
}

impl SecretBackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwsSecretsManager => "aws_secrets_manager",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for SecretBackendType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "aws_secrets_manager" => Ok(Self::AwsSecretsManager),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("Unknown secret backend type: {}", s)),
        }
    }
}

impl fmt::Display for SecretBackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by a backend's "get secret value" call.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The secret store has no secret with this identifier.
    #[error("secret '{secret_id}' does not exist in the backend")]
    NotFound { secret_id: String },

    /// Credentials were rejected or lack permission to read the secret.
    #[error("access denied: {message}")]
    AccessDenied { message: String },

    /// Network, service or protocol failure.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The call did not complete within the load timeout.
    #[error("request for '{secret_id}' timed out after {timeout:?}")]
    Timeout { secret_id: String, timeout: Duration },
}

impl BackendError {
    pub fn not_found(secret_id: impl Into<String>) -> Self {
        Self::NotFound { secret_id: secret_id.into() }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied { message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }
}

/// Trait for secret store backends
///
/// One request type: fetch the value stored under an identifier. Caching,
/// decoding and lookups are the caller's business.
///
/// Implementations must be Send + Sync; the client may issue calls from any
/// task.
#[async_trait]
pub trait SecretStoreBackend: Send + Sync + fmt::Debug {
    /// Fetch the raw value stored under `secret_id`.
    async fn get_secret_value(&self, secret_id: &str) -> BackendResult<SecretPayload>;

    /// Get the backend type identifier
    fn backend_type(&self) -> SecretBackendType;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_type_parse_and_display() {
        for bt in [SecretBackendType::AwsSecretsManager, SecretBackendType::Memory] {
            let parsed: SecretBackendType = bt.to_string().parse().unwrap();
            assert_eq!(bt, parsed);
        }
        assert!("vault".parse::<SecretBackendType>().is_err());
    }

    #[test]
    fn test_backend_type_serialization() {
        let json = serde_json::to_string(&SecretBackendType::AwsSecretsManager).unwrap();
        assert_eq!(json, "\"aws_secrets_manager\"");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Timeout {
            secret_id: "prod/api".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "request for 'prod/api' timed out after 5s");
        assert_eq!(
            BackendError::not_found("prod/api").to_string(),
            "secret 'prod/api' does not exist in the backend"
        );
    }
}
