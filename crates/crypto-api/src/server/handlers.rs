//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{ErrorResponse, FieldMap, HealthResponse, SignResponse, VerifyRequest},
    ServiceError,
};
use serde_json::Value;
use tracing::{debug, warn};

use super::state::AppState;
use crate::envelope;

/// `POST /v1/encrypt` — encrypt every field of the request object.
///
/// All-or-nothing: any field failure yields `500` and no partial output.
pub async fn encrypt(
    State(state): State<AppState>,
    body: Result<Json<FieldMap>, JsonRejection>,
) -> Response {
    let Json(fields) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match envelope::encrypt_all(&fields, state.cipher.as_ref()) {
        Ok(encrypted) => {
            debug!(
                fields = encrypted.len(),
                algorithm = %state.cipher.algorithm(),
                "payload encrypted"
            );
            (StatusCode::OK, Json(encrypted)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "encryption failed");
            error_response(&ServiceError::EncryptionFailure(e.to_string()))
        }
    }
}

/// `POST /v1/decrypt` — decrypt every string field that decodes.
///
/// Fields that fail to decode are returned unchanged; this endpoint only
/// fails for a malformed request body.
pub async fn decrypt(
    State(state): State<AppState>,
    body: Result<Json<FieldMap>, JsonRejection>,
) -> Response {
    let Json(fields) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    let outcome = envelope::decrypt_all(&fields, state.cipher.as_ref());
    debug!(
        fields = outcome.fields.len(),
        undecoded = outcome.undecoded.len(),
        algorithm = %state.cipher.algorithm(),
        "payload decrypted"
    );
    (StatusCode::OK, Json(outcome.fields)).into_response()
}

/// `POST /v1/sign` — sign the canonical form of an arbitrary JSON body.
pub async fn sign(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(document) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    let signature = envelope::sign_document(&document, &state.signer);
    (StatusCode::OK, Json(SignResponse { signature })).into_response()
}

/// `POST /v1/verify` — check a signature against a document.
///
/// `204` on match, `400 signature_mismatch` otherwise, `400 bad_request` when
/// the signature is not hex.
pub async fn verify(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match envelope::verify_document(&req.data, &req.signature, &state.signer) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(&ServiceError::SignatureMismatch),
        Err(e) => error_response(&ServiceError::BadRequest(e.to_string())),
    }
}

/// `GET /health` — liveness check reporting the active cipher.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        algorithm: state.cipher.algorithm().to_string(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> Response {
    error_response(&ServiceError::NotFound)
}

fn invalid_body(rejection: JsonRejection) -> Response {
    debug!(error = %rejection.body_text(), "rejected request body");
    error_response(&ServiceError::BadRequest("invalid JSON payload".into()))
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Base64Codec, HmacSigner};
    use axum::{body::Body, http::Request, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(
            Arc::new(Base64Codec::new()),
            HmacSigner::new(b"secret").unwrap(),
        );
        Router::new()
            .route("/health", get(health))
            .with_state(state)
    }

    #[tokio::test]
    async fn health_reports_algorithm() {
        let app = test_router();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.algorithm, "base64");
    }

    #[test]
    fn error_response_uses_service_error_status() {
        let resp = error_response(&ServiceError::SignatureMismatch);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = error_response(&ServiceError::EncryptionFailure("x".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
