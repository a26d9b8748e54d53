//! HMAC-SHA256 signing and constant-time verification of byte strings.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors produced by the signer.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The signing key is empty.
    #[error("signing key must not be empty")]
    EmptyKey,

    /// The presented signature is not valid hex.
    #[error("signature is not valid hex")]
    MalformedSignature(#[source] hex::FromHexError),
}

/// Keyed signer producing hex-encoded HMAC-SHA256 tags.
///
/// The keyed MAC state is computed once and cloned for every operation.
#[derive(Clone)]
pub struct HmacSigner {
    mac: HmacSha256,
}

impl HmacSigner {
    /// # Errors
    ///
    /// Returns [`SignerError::EmptyKey`] if `key` is empty.
    pub fn new(key: &[u8]) -> Result<Self, SignerError> {
        if key.is_empty() {
            return Err(SignerError::EmptyKey);
        }
        let mac = HmacSha256::new_from_slice(key).map_err(|_| SignerError::EmptyKey)?;
        Ok(Self { mac })
    }

    /// Hex-encoded HMAC-SHA256 of `data`. Deterministic for a given key.
    pub fn sign(&self, data: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check `signature` against `data`.
    ///
    /// The comparison is constant-time. A well-formed signature that does not
    /// match yields `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MalformedSignature`] if `signature` is not hex.
    pub fn verify(&self, data: &[u8], signature: &str) -> Result<bool, SignerError> {
        let expected = hex::decode(signature).map_err(SignerError::MalformedSignature)?;
        let mut mac = self.mac.clone();
        mac.update(data);
        Ok(mac.verify_slice(&expected).is_ok())
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HmacSigner([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> HmacSigner {
        HmacSigner::new(b"supersecret").unwrap()
    }

    #[test]
    fn sign_is_deterministic() {
        let signer = signer();
        assert_eq!(signer.sign(b"hello world"), signer.sign(b"hello world"));
    }

    #[test]
    fn signature_is_256_bit_hex() {
        let sig = signer().sign(b"hello world");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn matches_rfc4231_test_case_2() {
        let signer = HmacSigner::new(b"Jefe").unwrap();
        assert_eq!(
            signer.sign(b"what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn verify_accepts_valid_signature() {
        let signer = signer();
        let sig = signer.sign(b"hello world");
        assert!(signer.verify(b"hello world", &sig).unwrap());
    }

    #[test]
    fn verify_rejects_tampered_data() {
        let signer = signer();
        let sig = signer.sign(b"hello world");
        assert!(!signer.verify(b"h3llo world", &sig).unwrap());
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let signer = signer();
        let mut raw = hex::decode(signer.sign(b"hello world")).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xFF;
        assert!(!signer.verify(b"hello world", &hex::encode(raw)).unwrap());
    }

    #[test]
    fn verify_rejects_truncated_signature() {
        let signer = signer();
        let sig = signer.sign(b"hello world");
        assert!(!signer.verify(b"hello world", &sig[..32]).unwrap());
    }

    #[test]
    fn malformed_signature_is_an_error() {
        assert!(matches!(
            signer().verify(b"hello world", "nothex!!!"),
            Err(SignerError::MalformedSignature(_))
        ));
    }

    #[test]
    fn different_keys_give_different_signatures() {
        let other = HmacSigner::new(b"othersecret").unwrap();
        assert_ne!(signer().sign(b"hello world"), other.sign(b"hello world"));
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(HmacSigner::new(b""), Err(SignerError::EmptyKey)));
    }
}
