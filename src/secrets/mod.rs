//! Secret loading abstraction.
//!
//! Applications read sensitive configuration (database passwords, API tokens)
//! through the [`SecretClient`] trait, which has two operations:
//! - **load_secrets**: fetch the whole secret bundle once, at startup
//! - **get_secret**: look up one value from what was loaded
//!
//! # Architecture
//!
//! [`CachedSecretClient`] implements the trait on top of any
//! [`SecretStoreBackend`]: it fetches the bundle stored under
//! `<environment>/<secret_key>` (a [`SecretStoreHandle`]), decodes it as a flat
//! JSON object of strings and serves lookups from memory.
//!
//! # Supported Backends
//!
//! - **AWS Secrets Manager**: (Optional feature `aws`)
//! - **Memory**: development and tests
//!
//! # Example
//!
//! ```rust,ignore
//! use secretsmanager::config::SecretsSettings;
//! use secretsmanager::secrets::{CachedSecretClient, SecretClient};
//!
//! let settings = SecretsSettings::from_env()?;
//! let client = CachedSecretClient::from_settings(&settings).await?;
//! client.load_secrets().await?;
//!
//! let password = client.get_secret("DB_PASS").await?;
//! ```
//!
//! # Security Considerations
//!
//! - Secret values are never logged or included in errors
//! - Cached values are redacted in `Debug` output and zeroed on drop
//! - The cache lives in process memory only

pub mod backends;
pub mod cached;
pub mod client;
pub mod error;
pub mod handle;
pub mod types;

pub use backends::{BackendError, MemorySecretBackend, SecretBackendType, SecretStoreBackend};
#[cfg(feature = "aws")]
pub use backends::AwsSecretsManagerBackend;
pub use cached::CachedSecretClient;
pub use client::SecretClient;
pub use error::{Result, SecretsError};
pub use handle::SecretStoreHandle;
pub use types::{SecretPayload, SecretString};
