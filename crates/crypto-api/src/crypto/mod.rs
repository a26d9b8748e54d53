//! Field ciphers, document signing, and canonical JSON encoding.
//!
//! This module is intentionally free of HTTP dependencies. It provides the
//! single-value primitives used by [`crate::envelope`].
//!
//! # Ciphers
//!
//! Two implementations share the [`Cipher`] contract:
//!
//! - [`AeadCipher`]: AES-GCM-SIV with a fresh random nonce per call. The
//!   envelope is `base64(nonce ‖ ciphertext ‖ tag)`.
//! - [`Base64Codec`]: keyless, reversible base64 of the JSON form. Default and
//!   fallback; it provides no confidentiality.
//!
//! Envelopes are not cross-compatible between the two.

pub mod aead;
pub mod canonical;
pub mod codec;
pub mod key;
pub mod signer;

pub use aead::AeadCipher;
pub use codec::Base64Codec;
pub use key::KeyMaterial;
pub use signer::{HmacSigner, SignerError};

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Errors produced by a single-value encrypt or decrypt.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is not 16, 24, or 32 bytes long.
    #[error("invalid key length: expected 16, 24 or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The envelope is not valid base64.
    #[error("envelope is not valid base64")]
    Decode(#[source] base64::DecodeError),

    /// The decoded envelope is shorter than a nonce.
    #[error("envelope truncated: {len} bytes is shorter than the {min}-byte nonce")]
    Truncated { len: usize, min: usize },

    /// The authentication tag did not verify (tampering, wrong key, or corrupted nonce).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Authenticated plaintext is not valid serialized JSON.
    #[error("decrypted plaintext is not valid JSON")]
    MalformedPlaintext(#[source] serde_json::Error),

    /// The AEAD refused to seal the plaintext.
    #[error("aead seal failed")]
    SealFailed,

    /// The input value could not be serialized.
    #[error("failed to serialize value")]
    Serialization(#[source] serde_json::Error),
}

/// A reversible transform applied to one JSON value at a time.
///
/// Implementations hold only immutable key material and are shared across
/// request handlers without locking.
#[cfg_attr(test, mockall::automock)]
pub trait Cipher: Send + Sync {
    /// Transform `value` into an opaque envelope string.
    fn encrypt(&self, value: &Value) -> Result<String, CipherError>;

    /// Recover the value from an envelope produced by this same cipher.
    fn decrypt(&self, envelope: &str) -> Result<Value, CipherError>;

    /// The algorithm this cipher implements.
    fn algorithm(&self) -> Algorithm;
}

/// Selectable field-cipher algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Keyless base64 encoding of the JSON form.
    Base64,
    /// AES-GCM-SIV authenticated encryption.
    AesGcm,
}

impl Algorithm {
    /// Parse a configured algorithm name. Returns `None` for unrecognised names.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "base64" => Some(Self::Base64),
            "aesgcm" => Some(Self::AesGcm),
            _ => None,
        }
    }

    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::AesGcm => "aesgcm",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construct the shared cipher for `algorithm`.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `algorithm` is
/// [`Algorithm::AesGcm`] and `key` is not 16, 24, or 32 bytes.
pub fn build_cipher(algorithm: Algorithm, key: &[u8]) -> Result<Arc<dyn Cipher>, CipherError> {
    Ok(match algorithm {
        Algorithm::Base64 => Arc::new(Base64Codec::new()),
        Algorithm::AesGcm => Arc::new(AeadCipher::new(key)?),
    })
}
