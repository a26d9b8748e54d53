//! Graceful shutdown signal handling.

use std::future::Future;
use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tracing::{error, info};

/// How long in-flight requests may keep draining after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Resolves when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
///
/// Passed to `axum::serve(..).with_graceful_shutdown`, so in-flight requests
/// complete before the server future returns.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Drive `serve` to completion, giving up once it is still draining `grace`
/// after `signalled` resolves.
///
/// Returns `None` when the deadline expired; the abandoned future is dropped.
pub async fn drain_with_deadline<F, S>(
    serve: F,
    signalled: S,
    grace: Duration,
) -> Option<F::Output>
where
    F: Future,
    S: Future<Output = ()>,
{
    tokio::pin!(serve);
    tokio::pin!(signalled);

    tokio::select! {
        out = &mut serve => return Some(out),
        () = &mut signalled => {}
    }

    tokio::time::timeout(grace, serve).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finished_server_returns_its_output() {
        let out = drain_with_deadline(async { 7 }, std::future::pending(), SHUTDOWN_GRACE).await;
        assert_eq!(out, Some(7));
    }

    #[tokio::test]
    async fn drain_finishing_within_grace_is_kept() {
        let serve = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            "drained"
        };
        let out = drain_with_deadline(serve, async {}, Duration::from_secs(5)).await;
        assert_eq!(out, Some("drained"));
    }

    #[tokio::test]
    async fn stuck_drain_is_abandoned_after_grace() {
        let out = drain_with_deadline(
            std::future::pending::<()>(),
            async {},
            Duration::from_millis(20),
        )
        .await;
        assert_eq!(out, None);
    }
}
