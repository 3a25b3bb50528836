use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hkdf::Hkdf;
use sha2::Sha256;

use crate::domain::secret::{EncryptedSecret, Secret};
use crate::error::{PaymentError, Result};

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Reversible encryption of processor secrets at rest.
///
/// AES-256-GCM with a random nonce per encryption, so ciphertexts are not
/// deterministic; only round-trip correctness is guaranteed. The at-rest
/// form is base64 of `nonce || ciphertext`.
#[derive(Clone)]
pub struct CredentialVault {
    cipher: Aes256Gcm,
}

impl CredentialVault {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Derives the vault key from a passphrase using HKDF-SHA256.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let hk = Hkdf::<Sha256>::new(None, passphrase.as_bytes());
        let mut key = [0u8; 32];
        hk.expand(b"credential_vault_key", &mut key)
            .expect("32 bytes is a valid HKDF-SHA256 output length");
        Self::new(&key)
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| PaymentError::Decryption(format!("encryption failed: {e}")))?;

        let mut buf = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(&ciphertext);
        Ok(EncryptedSecret::new(BASE64.encode(buf)))
    }

    /// Fails on malformed base64, truncated input, or a GCM authentication
    /// failure (tampered ciphertext or wrong key).
    pub fn decrypt(&self, secret: &EncryptedSecret) -> Result<Secret> {
        let raw = BASE64
            .decode(secret.as_str())
            .map_err(|e| PaymentError::Decryption(format!("invalid base64: {e}")))?;
        if raw.len() < NONCE_LEN {
            return Err(PaymentError::Decryption(
                "ciphertext too short".to_string(),
            ));
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| PaymentError::Decryption("ciphertext rejected".to_string()))?;
        let plaintext = String::from_utf8(plaintext)
            .map_err(|_| PaymentError::Decryption("plaintext is not valid UTF-8".to_string()))?;
        Ok(Secret::new(plaintext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let vault = CredentialVault::from_passphrase("test-passphrase");
        let encrypted = vault.encrypt("sk_live_abc123").unwrap();
        let decrypted = vault.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted.reveal(), "sk_live_abc123");
    }

    #[test]
    fn test_ciphertexts_are_not_deterministic() {
        let vault = CredentialVault::from_passphrase("test-passphrase");
        let a = vault.encrypt("same-secret").unwrap();
        let b = vault.encrypt("same-secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tampered_ciphertext_is_rejected() {
        let vault = CredentialVault::from_passphrase("test-passphrase");
        let encrypted = vault.encrypt("sk_live_abc123").unwrap();

        let mut raw = BASE64.decode(encrypted.as_str()).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = EncryptedSecret::new(BASE64.encode(raw));

        assert!(matches!(
            vault.decrypt(&tampered),
            Err(PaymentError::Decryption(_))
        ));
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let vault = CredentialVault::from_passphrase("test-passphrase");
        let other = CredentialVault::from_passphrase("other-passphrase");
        let encrypted = vault.encrypt("sk_live_abc123").unwrap();

        assert!(matches!(
            other.decrypt(&encrypted),
            Err(PaymentError::Decryption(_))
        ));
    }

    #[test]
    fn test_malformed_inputs_are_rejected() {
        let vault = CredentialVault::from_passphrase("test-passphrase");

        assert!(matches!(
            vault.decrypt(&EncryptedSecret::new("not base64!!!")),
            Err(PaymentError::Decryption(_))
        ));
        // Valid base64 but shorter than a nonce.
        assert!(matches!(
            vault.decrypt(&EncryptedSecret::new(BASE64.encode([1u8, 2, 3]))),
            Err(PaymentError::Decryption(_))
        ));
    }
}
