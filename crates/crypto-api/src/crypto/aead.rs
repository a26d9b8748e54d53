//! AES-GCM-SIV encryption and decryption of individual JSON values.
//!
//! **Algorithm choice:** AES-GCM-SIV (RFC 8452) is nonce-misuse-resistant, so
//! an accidental nonce collision leaks only plaintext equality rather than
//! the authentication key. A fresh random nonce is still drawn for every call.
//!
//! The key length selects the block cipher: 16 bytes → AES-128,
//! 24 bytes → AES-192, 32 bytes → AES-256.

use aes::Aes192;
use aes_gcm_siv::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes128GcmSiv, Aes256GcmSiv, AesGcmSiv, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use super::{Algorithm, Cipher, CipherError};

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Key schedule for one of the three supported AES strengths.
enum Sealer {
    Aes128(Aes128GcmSiv),
    Aes192(AesGcmSiv<Aes192>),
    Aes256(Aes256GcmSiv),
}

impl Sealer {
    fn new(key: &[u8]) -> Result<Self, CipherError> {
        let invalid = |_| CipherError::InvalidKeyLength(key.len());
        match key.len() {
            16 => Aes128GcmSiv::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => AesGcmSiv::<Aes192>::new_from_slice(key)
                .map(Self::Aes192)
                .map_err(invalid),
            32 => Aes256GcmSiv::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            n => Err(CipherError::InvalidKeyLength(n)),
        }
    }

    fn seal(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm_siv::Error> {
        match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes192(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        }
    }

    fn open(&self, nonce: &Nonce, sealed: &[u8]) -> Result<Vec<u8>, aes_gcm_siv::Error> {
        match self {
            Self::Aes128(c) => c.decrypt(nonce, sealed),
            Self::Aes192(c) => c.decrypt(nonce, sealed),
            Self::Aes256(c) => c.decrypt(nonce, sealed),
        }
    }

    fn key_bits(&self) -> usize {
        match self {
            Self::Aes128(_) => 128,
            Self::Aes192(_) => 192,
            Self::Aes256(_) => 256,
        }
    }
}

/// Authenticated field cipher.
///
/// Envelope format: `base64(nonce ‖ ciphertext ‖ tag)` using the standard
/// padded alphabet. The plaintext is the ordinary JSON serialization of the
/// value; key order inside it is irrelevant because the result is opaque.
pub struct AeadCipher {
    sealer: Sealer,
}

impl AeadCipher {
    /// Build a cipher from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] unless `key` is 16, 24, or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        Ok(Self {
            sealer: Sealer::new(key)?,
        })
    }

    /// Seal raw plaintext bytes under a freshly generated nonce.
    fn seal_bytes(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = self
            .sealer
            .seal(nonce, plaintext)
            .map_err(|_| CipherError::SealFailed)?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + plaintext.len() + TAG_LEN);
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&sealed);
        Ok(STANDARD.encode(envelope))
    }
}

impl std::fmt::Debug for AeadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AeadCipher")
            .field("key_bits", &self.sealer.key_bits())
            .finish_non_exhaustive()
    }
}

impl Cipher for AeadCipher {
    fn encrypt(&self, value: &Value) -> Result<String, CipherError> {
        let plaintext = serde_json::to_vec(value).map_err(CipherError::Serialization)?;
        self.seal_bytes(&plaintext)
    }

    fn decrypt(&self, envelope: &str) -> Result<Value, CipherError> {
        let raw = STANDARD.decode(envelope).map_err(CipherError::Decode)?;
        if raw.len() < NONCE_LEN {
            return Err(CipherError::Truncated {
                len: raw.len(),
                min: NONCE_LEN,
            });
        }

        let (nonce, sealed) = raw.split_at(NONCE_LEN);
        let plaintext = self
            .sealer
            .open(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CipherError::AuthenticationFailed)?;

        serde_json::from_slice(&plaintext).map_err(CipherError::MalformedPlaintext)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::AesGcm
    }
}
