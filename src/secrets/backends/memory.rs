//! In-memory secret store backend.
//!
//! Holds secret payloads in a shared map. Intended for local development and
//! tests; clones share the same map, so a test can keep one handle to change
//! the stored payload while the client owns another.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::backend::{BackendError, BackendResult, SecretBackendType, SecretStoreBackend};
use crate::secrets::types::SecretPayload;

#[derive(Debug, Clone, Default)]
pub struct MemorySecretBackend {
    secrets: Arc<RwLock<HashMap<String, SecretPayload>>>,
    fetches: Arc<AtomicUsize>,
}

impl MemorySecretBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a JSON bundle as a string payload.
    pub async fn put_json(&self, secret_id: impl Into<String>, json: impl Into<String>) {
        self.put_payload(secret_id, SecretPayload::from_string(json)).await;
    }

    pub async fn put_payload(&self, secret_id: impl Into<String>, payload: SecretPayload) {
        self.secrets.write().await.insert(secret_id.into(), payload);
    }

    /// Remove a secret; later fetches of it fail with `NotFound`.
    pub async fn remove(&self, secret_id: &str) -> Option<SecretPayload> {
        self.secrets.write().await.remove(secret_id)
    }

    /// Number of `get_secret_value` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStoreBackend for MemorySecretBackend {
    async fn get_secret_value(&self, secret_id: &str) -> BackendResult<SecretPayload> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        debug!(secret_id = %secret_id, "Fetching secret from memory backend");

        self.secrets
            .read()
            .await
            .get(secret_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(secret_id))
    }

    fn backend_type(&self) -> SecretBackendType {
        SecretBackendType::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_fetch() {
        let backend = MemorySecretBackend::new();
        backend.put_json("dev/app", r#"{"K":"v"}"#).await;

        let payload = backend.get_secret_value("dev/app").await.unwrap();
        assert_eq!(payload.bytes(), br#"{"K":"v"}"#);
        assert_eq!(backend.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_secret_is_not_found() {
        let backend = MemorySecretBackend::new();
        let err = backend.get_secret_value("dev/none").await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { ref secret_id } if secret_id == "dev/none"));
        assert_eq!(backend.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let backend = MemorySecretBackend::new();
        let handle = backend.clone();

        handle.put_payload("dev/app", SecretPayload::from_binary(b"{}".to_vec())).await;
        assert!(backend.get_secret_value("dev/app").await.is_ok());

        handle.remove("dev/app").await;
        assert!(backend.get_secret_value("dev/app").await.is_err());
        assert_eq!(handle.fetch_count(), 2);
        assert_eq!(backend.backend_type(), SecretBackendType::Memory);
    }
}
