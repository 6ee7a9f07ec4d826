//! Value types shared by the secret client and its backends.

use serde::{Deserialize, Deserializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A cached secret value.
///
/// `Debug` and `Display` print `[REDACTED]`, and the backing memory is zeroed
/// on drop. The value is only reachable through [`SecretString::expose_secret`].
///
/// Deserializes from a JSON string and nothing else, which is what makes a
/// secret bundle with a nested object, array or number fail to decode.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the plaintext value. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Raw response of a backend "get secret value" call.
///
/// Backends fill whichever fields their service returned. AWS Secrets Manager,
/// for example, sets exactly one of `SecretBinary` / `SecretString`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretPayload {
    pub binary: Option<Vec<u8>>,
    pub string: Option<String>,
}

impl SecretPayload {
    pub fn from_binary(bytes: impl Into<Vec<u8>>) -> Self {
        Self { binary: Some(bytes.into()), string: None }
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Self { binary: None, string: Some(value.into()) }
    }

    /// Bytes to decode as the secret bundle.
    ///
    /// The binary field wins when both are set. A payload with neither yields
    /// an empty slice, which then fails to decode.
    pub fn bytes(&self) -> &[u8] {
        match (&self.binary, &self.string) {
            (Some(binary), _) => binary,
            (None, Some(string)) => string.as_bytes(),
            (None, None) => &[],
        }
    }
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretPayload")
            .field("binary_len", &self.binary.as_ref().map(Vec::len))
            .field("string_len", &self.string.as_ref().map(String::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_secret_string_is_redacted() {
        let secret = SecretString::new("hunter2");
        assert_eq!(format!("{:?}", secret), "SecretString([REDACTED])");
        assert_eq!(secret.to_string(), "[REDACTED]");
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_secret_string_only_deserializes_strings() {
        let ok: HashMap<String, SecretString> =
            serde_json::from_str(r#"{"DB_USER":"admin"}"#).unwrap();
        assert_eq!(ok["DB_USER"].expose_secret(), "admin");

        assert!(serde_json::from_str::<HashMap<String, SecretString>>(r#"{"PORT":5432}"#).is_err());
        assert!(serde_json::from_str::<HashMap<String, SecretString>>(r#"{"A":{"B":"c"}}"#).is_err());
        assert!(serde_json::from_str::<HashMap<String, SecretString>>(r#"{"A":null}"#).is_err());
    }

    #[test]
    fn test_map_debug_hides_values() {
        let map: HashMap<String, SecretString> =
            serde_json::from_str(r#"{"DB_PASS":"s3cret"}"#).unwrap();
        let debug = format!("{:?}", map);
        assert!(debug.contains("DB_PASS"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_payload_prefers_binary() {
        let payload = SecretPayload {
            binary: Some(br#"{"from":"binary"}"#.to_vec()),
            string: Some(r#"{"from":"string"}"#.to_string()),
        };
        assert_eq!(payload.bytes(), br#"{"from":"binary"}"#);
    }

    #[test]
    fn test_payload_falls_back_to_string_then_empty() {
        assert_eq!(SecretPayload::from_string("{}").bytes(), b"{}");
        assert!(SecretPayload::default().bytes().is_empty());
    }

    #[test]
    fn test_payload_debug_hides_contents() {
        let payload = SecretPayload::from_string(r#"{"TOKEN":"abc123"}"#);
        let debug = format!("{:?}", payload);
        assert!(!debug.contains("abc123"));
        assert!(debug.contains("string_len"));
    }
}
