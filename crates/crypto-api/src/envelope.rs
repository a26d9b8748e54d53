//! Per-field application of a [`Cipher`] to a JSON object, and whole-document
//! signing over the canonical form.
//!
//! # Failure policy
//!
//! - [`encrypt_all`] is all-or-nothing: one failing field discards the output.
//! - [`decrypt_all`] is best-effort per field: a string that does not decode
//!   is passed through unchanged, and non-string values are never touched.

use common::protocol::FieldMap;
use serde_json::Value;
use thiserror::Error;

use crate::crypto::{canonical::canonicalize, Cipher, CipherError, HmacSigner, SignerError};

/// Errors produced by the envelope layer.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// A field could not be encrypted; no partial output is produced.
    #[error("encryption failed for field `{field}`")]
    EncryptionFailed {
        field: String,
        #[source]
        source: CipherError,
    },
}

/// Result of [`decrypt_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecryptOutcome {
    /// The output map: decoded values, or the original value where decoding failed.
    pub fields: FieldMap,
    /// Names of string fields that failed to decode and were passed through, sorted.
    pub undecoded: Vec<String>,
}

/// Encrypt every value of `fields`.
///
/// # Errors
///
/// Returns [`EnvelopeError::EncryptionFailed`] naming the first field that
/// failed. No partially encrypted map is returned.
pub fn encrypt_all(fields: &FieldMap, cipher: &dyn Cipher) -> Result<FieldMap, EnvelopeError> {
    fields
        .iter()
        .map(|(name, value)| {
            cipher
                .encrypt(value)
                .map(|envelope| (name.clone(), Value::String(envelope)))
                .map_err(|source| EnvelopeError::EncryptionFailed {
                    field: name.clone(),
                    source,
                })
        })
        .collect()
}

/// Decrypt every string value of `fields`, keeping the original on failure.
pub fn decrypt_all(fields: &FieldMap, cipher: &dyn Cipher) -> DecryptOutcome {
    let mut out = FieldMap::new();
    let mut undecoded = Vec::new();

    for (name, value) in fields {
        let decoded = match value {
            Value::String(envelope) => match cipher.decrypt(envelope) {
                Ok(plain) => plain,
                Err(_) => {
                    undecoded.push(name.clone());
                    value.clone()
                }
            },
            other => other.clone(),
        };
        out.insert(name.clone(), decoded);
    }

    undecoded.sort_unstable();
    DecryptOutcome {
        fields: out,
        undecoded,
    }
}

/// Sign the canonical form of `document`.
pub fn sign_document(document: &Value, signer: &HmacSigner) -> String {
    signer.sign(&canonicalize(document))
}

/// Verify `signature` against the canonical form of `document`.
///
/// # Errors
///
/// Returns [`SignerError::MalformedSignature`] if `signature` is not hex.
pub fn verify_document(
    document: &Value,
    signature: &str,
    signer: &HmacSigner,
) -> Result<bool, SignerError> {
    signer.verify(&canonicalize(document), signature)
}
