//! Structured logging with optional OpenTelemetry span export.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext, or ciphertext** may appear in any span
//!   attribute or log field. Handlers log field counts and algorithm names only.
//! - Log level is configurable via `CRYPTO_API_LOG_LEVEL` (default: `info`);
//!   `RUST_LOG` takes precedence when set.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
