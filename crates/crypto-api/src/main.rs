//! `crypto-api` — binary entry point.
//!
//! Startup sequence:
//! 1. Parse command-line flags and load [`Config`] (defaults → env → flags).
//! 2. Initialise structured logging (and OTLP export when configured).
//! 3. Build the field cipher and the document signer from the configured key.
//! 4. Build the Axum router and serve until SIGINT/SIGTERM, then drain
//!    in-flight requests for at most five seconds.

mod config;
mod crypto;
mod envelope;
mod server;
mod telemetry;

use std::future::IntoFuture;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use config::{Cli, Config};
use crypto::{Algorithm, HmacSigner};
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cli = Cli::parse();
    let cfg = Config::load(&cli).map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "crypto-api starting"
    );

    // -----------------------------------------------------------------------
    // 3. Cipher + signer
    // -----------------------------------------------------------------------
    let algorithm = Algorithm::parse(&cfg.encryption_algorithm).unwrap_or_else(|| {
        warn!(
            requested = %cfg.encryption_algorithm,
            fallback = %Algorithm::Base64,
            "unrecognised encryption algorithm"
        );
        Algorithm::Base64
    });
    let cipher = crypto::build_cipher(algorithm, cfg.encryption_key.as_bytes())
        .with_context(|| format!("failed to initialise {algorithm} cipher"))?;
    let signer =
        HmacSigner::new(cfg.encryption_key.as_bytes()).context("failed to initialise signer")?;

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(AppState::new(cipher, signer));

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, algorithm = %algorithm, "listening");

    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let serve = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            server::shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    let signalled = async move {
        let _ = signalled_rx.await;
    };

    let drained = server::drain_with_deadline(serve, signalled, server::SHUTDOWN_GRACE).await;
    let outcome = match drained {
        Some(result) => result.context("HTTP server error"),
        None => Err(anyhow::anyhow!(
            "server forced to shut down after {}s with requests in flight",
            server::SHUTDOWN_GRACE.as_secs()
        )),
    };
    if outcome.is_ok() {
        info!("server shut down gracefully");
    }

    telemetry::shutdown_telemetry();
    outcome
}
