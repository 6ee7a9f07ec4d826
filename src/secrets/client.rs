//! Core secret client trait.

use async_trait::async_trait;
use std::sync::Arc;

use super::error::Result;

/// Read-only access to a bundle of secrets.
///
/// Implementations prefetch their secrets in [`load_secrets`](Self::load_secrets)
/// and serve [`get_secret`](Self::get_secret) from memory. Callers must treat
/// `load_secrets` as a required initialisation step; before it succeeds every
/// lookup fails.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log secret values
/// - Errors carry keys and identifiers, never values
///
/// # Example Implementation
///
/// ```rust,ignore
/// use secretsmanager::secrets::{Result, SecretClient, SecretsError};
/// use async_trait::async_trait;
///
/// struct StaticSecrets(std::collections::HashMap<String, String>);
///
/// #[async_trait]
/// impl SecretClient for StaticSecrets {
///     async fn load_secrets(&self) -> Result<()> {
///         Ok(())
///     }
///
///     async fn get_secret(&self, key: &str) -> Result<String> {
///         self.0.get(key).cloned().ok_or_else(|| SecretsError::not_found(key))
///     }
/// }
/// ```
#[async_trait]
pub trait SecretClient: Send + Sync {
    /// Fetch the secret bundle from the provider and replace the in-memory
    /// cache with it.
    ///
    /// Safe to call repeatedly; each successful call fully replaces the
    /// previous contents. Dropping the returned future cancels the in-flight
    /// provider request.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Fetch`](super::SecretsError::Fetch) if the provider call fails
    /// - [`SecretsError::Decode`](super::SecretsError::Decode) if the bundle is malformed
    async fn load_secrets(&self) -> Result<()>;

    /// Look up a single secret by key.
    ///
    /// Served from memory only; never contacts the provider.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`](super::SecretsError::NotFound) if the key is
    ///   not cached, including when nothing has been loaded yet
    async fn get_secret(&self, key: &str) -> Result<String>;
}

#[async_trait]
impl<T: SecretClient + ?Sized> SecretClient for Arc<T> {
    async fn load_secrets(&self) -> Result<()> {
        (**self).load_secrets().await
    }

    async fn get_secret(&self, key: &str) -> Result<String> {
        (**self).get_secret(key).await
    }
}

#[async_trait]
impl<T: SecretClient + ?Sized> SecretClient for Box<T> {
    async fn load_secrets(&self) -> Result<()> {
        (**self).load_secrets().await
    }

    async fn get_secret(&self, key: &str) -> Result<String> {
        (**self).get_secret(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::SecretsError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal implementation used to check the trait is usable behind `dyn`.
    #[derive(Default)]
    struct FixedSecrets {
        loaded: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl SecretClient for FixedSecrets {
        async fn load_secrets(&self) -> Result<()> {
            let mut loaded = self.loaded.lock().unwrap();
            *loaded = HashMap::from([("API_TOKEN".to_string(), "t0ken".to_string())]);
            Ok(())
        }

        async fn get_secret(&self, key: &str) -> Result<String> {
            self.loaded
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| SecretsError::not_found(key))
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let client: Arc<dyn SecretClient> = Arc::new(FixedSecrets::default());

        assert!(client.get_secret("API_TOKEN").await.unwrap_err().is_not_found());

        client.load_secrets().await.unwrap();
        assert_eq!(client.get_secret("API_TOKEN").await.unwrap(), "t0ken");
    }

    #[tokio::test]
    async fn test_boxed_client() {
        let client: Box<dyn SecretClient> = Box::new(FixedSecrets::default());
        client.load_secrets().await.unwrap();
        assert!(client.get_secret("OTHER").await.unwrap_err().is_not_found());
    }
}
