use serde::{Deserialize, Serialize};
use std::fmt;

/// A decrypted processor credential.
///
/// Wraps the plaintext so it never leaks through `Debug` or `Display` output;
/// callers must `reveal()` explicitly to read the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// The at-rest form of a credential: base64 of `nonce || ciphertext` as
/// produced by the credential vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedSecret(String);

impl EncryptedSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::new("sk_live_123");
        assert_eq!(format!("{secret:?}"), "****");
        assert_eq!(format!("{secret}"), "****");
        assert_eq!(secret.reveal(), "sk_live_123");
    }

    #[test]
    fn test_encrypted_secret_serializes_as_plain_string() {
        let secret = EncryptedSecret::new("YWJjZGVm");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"YWJjZGVm\"");
        let back: EncryptedSecret = serde_json::from_str(&json).unwrap();
        assert_eq!(back, secret);
    }
}
