//! Pluggable secret store backends
//!
//! A backend answers one question: what is stored under this identifier?
//! [`CachedSecretClient`](super::CachedSecretClient) owns one and does the
//! caching and decoding.
//!
//! ## Supported Backends
//!
//! - **AWS Secrets Manager**: (Optional feature `aws`)
//! - **Memory**: in-process map for development and tests

#[cfg(feature = "aws")]
pub mod aws;
pub mod backend;
pub mod memory;

#[cfg(feature = "aws")]
pub use aws::AwsSecretsManagerBackend;
pub use backend::{BackendError, BackendResult, SecretBackendType, SecretStoreBackend};
pub use memory::MemorySecretBackend;
