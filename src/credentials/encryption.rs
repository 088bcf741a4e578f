//! AES-256-GCM encryption for credential payloads.
//!
//! Every encryption uses a fresh random nonce; the output is a single
//! `base64(nonce || ciphertext+tag)` string so one column stores the whole
//! sealed value. AES-GCM is the one and only cipher here — there is no
//! non-reversible fallback path.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Size of the encryption key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Size of the nonce in bytes (96 bits, standard for GCM)
const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes
const TAG_SIZE: usize = 16;

/// Failures from encrypt/decrypt. Decryption failures are returned, never
/// thrown past the caller, and never yield partial plaintext.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Encryption key must be {KEY_SIZE} bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("Input is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Input shorter than nonce and authentication tag")]
    TooShort,

    #[error("Encryption failed: {0}")]
    Encrypt(String),

    #[error("Decryption failed: wrong key or corrupted data")]
    Failed,

    #[error("Decrypted data is not valid UTF-8")]
    Utf8,
}

/// Authenticated symmetric encryption under one process-wide key.
pub struct CryptoBox {
    cipher: Aes256Gcm,
}

impl CryptoBox {
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let cipher = Aes256Gcm::new_from_slice(key).expect("key length is const-checked");
        Self { cipher }
    }

    /// Builds a box from a base64-encoded key, validating the decoded length.
    pub fn from_base64(key_base64: &str) -> Result<Self, CryptoError> {
        let bytes = BASE64.decode(key_base64)?;
        let key: [u8; KEY_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength(bytes.len()))?;
        Ok(Self::new(&key))
    }

    /// Encrypts a plaintext string.
    ///
    /// A fresh random nonce is generated per call, so two encryptions of the
    /// same plaintext produce different outputs. Returns
    /// `base64(nonce || ciphertext+tag)`.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| CryptoError::Encrypt(e.to_string()))?;

        let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(combined))
    }

    /// Decrypts a value produced by [`encrypt`](Self::encrypt).
    ///
    /// Fails cleanly on invalid base64, truncated input, or a failed
    /// authentication tag check (tampered or wrong-key data).
    pub fn decrypt(&self, encoded: &str) -> Result<String, CryptoError> {
        let combined = BASE64.decode(encoded)?;
        if combined.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::TooShort);
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);
        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| CryptoError::Failed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::Utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_box() -> CryptoBox {
        CryptoBox::new(&[7u8; KEY_SIZE])
    }

    #[test]
    fn test_roundtrip() {
        let crypto = test_box();
        let plaintext = "my-secret-api-key-12345";
        let sealed = crypto.encrypt(plaintext).unwrap();
        assert_ne!(sealed, plaintext);
        assert_eq!(crypto.decrypt(&sealed).unwrap(), plaintext);
    }

    #[test]
    fn test_nonce_randomization() {
        let crypto = test_box();
        let sealed1 = crypto.encrypt("same-plaintext").unwrap();
        let sealed2 = crypto.encrypt("same-plaintext").unwrap();
        // Required property, not an optimization: identical plaintexts must
        // seal to different outputs.
        assert_ne!(sealed1, sealed2);
        assert_eq!(crypto.decrypt(&sealed1).unwrap(), "same-plaintext");
        assert_eq!(crypto.decrypt(&sealed2).unwrap(), "same-plaintext");
    }

    #[test]
    fn test_decrypt_invalid_base64_fails() {
        let crypto = test_box();
        assert!(matches!(
            crypto.decrypt("not base64 at all!!!"),
            Err(CryptoError::Base64(_))
        ));
    }

    #[test]
    fn test_decrypt_short_input_fails() {
        let crypto = test_box();
        let short = BASE64.encode([0u8; 8]);
        assert!(matches!(crypto.decrypt(&short), Err(CryptoError::TooShort)));
    }

    #[test]
    fn test_decrypt_tampered_fails() {
        let crypto = test_box();
        let sealed = crypto.encrypt("secret").unwrap();

        let mut bytes = BASE64.decode(&sealed).unwrap();
        let last = bytes.last_mut().unwrap();
        *last ^= 0xff;
        let tampered = BASE64.encode(&bytes);

        assert!(matches!(crypto.decrypt(&tampered), Err(CryptoError::Failed)));
    }

    #[test]
    fn test_decrypt_wrong_key_fails() {
        let sealed = test_box().encrypt("secret").unwrap();
        let other = CryptoBox::new(&[9u8; KEY_SIZE]);
        assert!(matches!(other.decrypt(&sealed), Err(CryptoError::Failed)));
    }

    #[test]
    fn test_from_base64_validates_length() {
        let short = BASE64.encode([0u8; 16]);
        assert!(matches!(
            CryptoBox::from_base64(&short),
            Err(CryptoError::InvalidKeyLength(16))
        ));
        let valid = BASE64.encode([0u8; KEY_SIZE]);
        assert!(CryptoBox::from_base64(&valid).is_ok());
    }

    #[test]
    fn test_unicode_and_empty() {
        let crypto = test_box();
        for plaintext in ["", "clé-API: 🔑 naïve"] {
            let sealed = crypto.encrypt(plaintext).unwrap();
            assert_eq!(crypto.decrypt(&sealed).unwrap(), plaintext);
        }
    }
}
