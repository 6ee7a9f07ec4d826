//! Secret store identifiers.

use std::fmt;

/// Identifier of the secret bundle in the backend, `<environment>/<secret_key>`.
///
/// Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretStoreHandle(String);

impl SecretStoreHandle {
    pub const SEPARATOR: char = '/';

    /// Join a deployment environment tag and an application secret key.
    pub fn new(environment: &str, secret_key: &str) -> Self {
        Self(format!("{}{}{}", environment, Self::SEPARATOR, secret_key))
    }

    /// Use a backend identifier verbatim (for example a full ARN).
    pub fn from_id(secret_id: impl Into<String>) -> Self {
        Self(secret_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretStoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SecretStoreHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
