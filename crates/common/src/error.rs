//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::SignatureMismatch`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::EncryptionFailure`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body is not valid JSON of the expected shape, or the signature is not hex.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The signature is well-formed but does not match the payload.
    #[error("payload/signature mismatch")]
    SignatureMismatch,

    /// No route matches the request.
    #[error("not found")]
    NotFound,

    /// Encrypting the payload failed.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::SignatureMismatch => 400,
            ServiceError::NotFound => 404,
            ServiceError::EncryptionFailure(_) => 500,
        }
    }

    /// Short machine-readable code placed in the `code` field of the error body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::SignatureMismatch => "signature_mismatch",
            ServiceError::NotFound => "not_found",
            ServiceError::EncryptionFailure(_) => "encryption_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::SignatureMismatch.http_status(), 400);
        assert_eq!(ServiceError::NotFound.http_status(), 404);
        assert_eq!(
            ServiceError::EncryptionFailure("x".into()).http_status(),
            500
        );
    }

    #[test]
    fn every_variant_has_its_own_code() {
        assert_eq!(ServiceError::BadRequest("x".into()).code(), "bad_request");
        assert_eq!(ServiceError::SignatureMismatch.code(), "signature_mismatch");
        assert_eq!(ServiceError::NotFound.code(), "not_found");
        assert_eq!(
            ServiceError::EncryptionFailure("x".into()).code(),
            "encryption_failure"
        );
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("invalid JSON payload".into());
        assert!(e.to_string().contains("invalid JSON payload"));
    }
}
