//! Load-once, serve-from-memory secret client.
//!
//! [`CachedSecretClient`] fetches a whole secret bundle (a flat JSON object of
//! strings) from a [`SecretStoreBackend`] in one call, decodes it into an
//! in-memory map, and answers every lookup from that map.
//!
//! # Cache semantics
//!
//! - Empty until the first successful load; lookups before that fail
//! - Each successful load replaces the map wholesale, never merges
//! - A failed fetch leaves the map untouched
//! - A failed decode leaves the map empty
//! - Lookups never reach the backend
//!
//! # Example
//!
//! ```rust,ignore
//! use secretsmanager::secrets::{
//!     CachedSecretClient, MemorySecretBackend, SecretClient, SecretStoreHandle,
//! };
//!
//! let backend = MemorySecretBackend::new();
//! backend.put_json("staging/billing", r#"{"DB_USER":"admin"}"#).await;
//!
//! let client = CachedSecretClient::new(SecretStoreHandle::new("staging", "billing"), backend);
//! client.load_secrets().await?;
//!
//! let user = client.get_secret("DB_USER").await?;
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, Instrument};

use super::backends::{BackendError, BackendResult, SecretStoreBackend};
use super::client::SecretClient;
use super::error::{Result, SecretsError};
use super::handle::SecretStoreHandle;
use super::types::{SecretPayload, SecretString};

/// Secret client that prefetches one bundle and serves lookups from memory.
///
/// # Thread Safety
///
/// The map sits behind a `RwLock`. A reload clears and refills it under one
/// write lock after the backend call returns, so concurrent lookups see
/// either the old or the new bundle.
#[derive(Debug)]
pub struct CachedSecretClient<B: SecretStoreBackend> {
    backend: B,
    handle: SecretStoreHandle,
    load_timeout: Option<Duration>,
    secrets: RwLock<HashMap<String, SecretString>>,
}

impl<B: SecretStoreBackend> CachedSecretClient<B> {
    /// Creates a client for `handle` on an already-configured backend.
    ///
    /// Performs no I/O. The cache starts empty.
    pub fn new(handle: SecretStoreHandle, backend: B) -> Self {
        Self { backend, handle, load_timeout: None, secrets: RwLock::new(HashMap::new()) }
    }

    /// Bound each backend fetch by `timeout` (`None` waits indefinitely).
    pub fn with_load_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Identifier the bundle is fetched under.
    pub fn secret_id(&self) -> &str {
        self.handle.as_str()
    }

    /// Handle the client was built with.
    pub fn handle(&self) -> &SecretStoreHandle {
        &self.handle
    }

    /// Underlying backend, e.g. to inspect its configuration.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Bound applied to each fetch, `None` when loads wait indefinitely.
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout
    }

    /// Number of secrets in the current bundle (0 before the first load or
    /// after a decode failure).
    pub async fn len(&self) -> usize {
        self.secrets.read().await.len()
    }

    /// Whether no bundle is currently cached.
    pub async fn is_empty(&self) -> bool {
        self.secrets.read().await.is_empty()
    }

    async fn fetch(&self) -> BackendResult<SecretPayload> {
        let secret_id = self.handle.as_str();
        let request = self.backend.get_secret_value(secret_id);

        match self.load_timeout {
            Some(timeout) => tokio::time::timeout(timeout, request).await.map_err(|_| {
                BackendError::Timeout { secret_id: secret_id.to_string(), timeout }
            })?,
            None => request.await,
        }
    }
}

#[async_trait]
impl<B: SecretStoreBackend> SecretClient for CachedSecretClient<B> {
    async fn load_secrets(&self) -> Result<()> {
        let secret_id = self.handle.as_str();
        let span = crate::secrets_span!(
            "load_secrets",
            secret_id,
            backend = %self.backend.backend_type()
        );

        async move {
            debug!("Fetching secret bundle");

            let payload = self.fetch().await.map_err(|e| {
                error!(error = %e, "Failed to fetch secret bundle");
                SecretsError::fetch(secret_id, e)
            })?;

            let mut secrets = self.secrets.write().await;
            secrets.clear();

            *secrets = serde_json::from_slice(payload.bytes()).map_err(|e| {
                error!(error = %e, "Failed to decode secret bundle");
                SecretsError::decode(secret_id, e)
            })?;

            info!(secret_count = secrets.len(), "Loaded secret bundle");
            Ok::<(), SecretsError>(())
        }
        .instrument(span)
        .await
    }

    async fn get_secret(&self, key: &str) -> Result<String> {
        match self.secrets.read().await.get(key) {
            Some(value) => Ok(value.expose_secret().to_string()),
            None => {
                debug!(secret_id = %self.handle, key = %key, "Secret not found in cache");
                Err(SecretsError::not_found(key))
            }
        }
    }
}
