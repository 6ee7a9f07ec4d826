//! Error types for secrets loading and lookup.

use thiserror::Error;

use super::backends::BackendError;

/// Result type for secrets operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while building a secret client, loading secrets or
/// looking them up.
///
/// Secret values never appear in these errors. Keys and secret store
/// identifiers do.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Settings or backend credentials could not be resolved.
    ///
    /// Fatal to client construction; callers should abort startup.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The backend request for the secret bundle failed.
    ///
    /// The cache is left exactly as it was before the load.
    #[error("Failed to fetch secret '{secret_id}': {source}")]
    Fetch {
        secret_id: String,
        #[source]
        source: BackendError,
    },

    /// The payload was not a flat JSON object of string values.
    ///
    /// The cache is left empty.
    #[error("Failed to decode secret '{secret_id}': {source}")]
    Decode {
        secret_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The requested key is not in the cache.
    #[error("Secret not found: {key}")]
    NotFound { key: String },
}

impl SecretsError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a fetch error for the given secret store identifier.
    pub fn fetch(secret_id: impl Into<String>, source: BackendError) -> Self {
        Self::Fetch { secret_id: secret_id.into(), source }
    }

    /// Create a decode error for the given secret store identifier.
    pub fn decode(secret_id: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode { secret_id: secret_id.into(), source }
    }

    /// Create a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<validator::ValidationErrors> for SecretsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::configuration(format!("Invalid secrets settings: {}", errors))
    }
}

impl From<config::ConfigError> for SecretsError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(format!("Failed to load secrets settings: {}", error))
    }
}
