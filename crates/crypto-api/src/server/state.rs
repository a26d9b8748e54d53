//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::{Cipher, HmacSigner};

/// Application state shared across all request handlers.
///
/// Both fields are `Arc`-wrapped so that Axum can clone the state for each
/// request without copying key schedules. Neither holds mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Field cipher selected at startup.
    pub cipher: Arc<dyn Cipher>,
    /// Document signer built from the same key as the cipher.
    pub signer: Arc<HmacSigner>,
}

impl AppState {
    /// Create a new [`AppState`] from the configured cipher and signer.
    pub fn new(cipher: Arc<dyn Cipher>, signer: HmacSigner) -> Self {
        Self {
            cipher,
            signer: Arc::new(signer),
        }
    }
}
