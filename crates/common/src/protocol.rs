//! Request and response types exchanged over the public HTTP API.
//!
//! Encrypt and decrypt bodies are bare JSON objects ([`FieldMap`]); sign and
//! verify use the small wrapper types below.

use serde::{Deserialize, Serialize};

/// A JSON object whose values are transformed one field at a time.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Sign / verify endpoints
// ---------------------------------------------------------------------------

/// Successful response body for `POST /v1/sign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignResponse {
    /// Hex-encoded HMAC-SHA256 over the canonical form of the request body.
    pub signature: String,
}

/// Request body for `POST /v1/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// The document that was signed. Key order is irrelevant.
    pub data: serde_json::Value,
    /// Hex-encoded signature previously returned by `POST /v1/sign`.
    pub signature: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; always `"ok"` once the server is listening.
    pub status: String,
    /// Name of the active cipher (`"base64"` or `"aesgcm"`).
    pub algorithm: String,
}
