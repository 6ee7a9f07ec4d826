//! # secretsmanager
//!
//! Provider-agnostic access to application secrets.
//!
//! Secrets are stored remotely as one JSON bundle per application and
//! environment. At startup the application loads the bundle once; afterwards
//! every lookup is answered from memory.
//!
//! ## Architecture
//!
//! ```text
//! SecretClient (load_secrets / get_secret)
//!      ↑
//! CachedSecretClient ──→ SecretStoreBackend ──→ AWS Secrets Manager
//!                                          └──→ in-memory map
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use secretsmanager::secrets::{
//!     CachedSecretClient, MemorySecretBackend, SecretClient, SecretStoreHandle,
//! };
//!
//! #[tokio::main]
//! async fn main() -> secretsmanager::Result<()> {
//!     let backend = MemorySecretBackend::new();
//!     backend.put_json("dev/app", r#"{"API_TOKEN":"t0ken"}"#).await;
//!
//!     let client = CachedSecretClient::new(SecretStoreHandle::new("dev", "app"), backend);
//!     client.load_secrets().await?;
//!     let token = client.get_secret("API_TOKEN").await?;
//!     assert_eq!(token, "t0ken");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod observability;
pub mod secrets;

pub use crate::config::{LoggingConfig, SecretsSettings};
pub use secrets::{CachedSecretClient, Result, SecretClient, SecretsError};
