//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Translate envelope and signer results into HTTP responses.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod shutdown;
pub mod state;

pub use shutdown::{drain_with_deadline, shutdown_signal, SHUTDOWN_GRACE};
