//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (Ctrl-C) and, on Unix, SIGTERM
//! - Combine OS signals with the in-process [`Shutdown`](super::Shutdown) trigger

use super::shutdown::StopSignal;

/// Resolves when the process receives Ctrl-C or SIGTERM.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Resolves on the first of: an in-process trigger, Ctrl-C, or SIGTERM.
///
/// A dropped [`Shutdown`](super::Shutdown) that never fired is not treated as
/// a request to stop; only OS signals remain in that case.
pub async fn shutdown_requested(mut stop: StopSignal) {
    let triggered = async move {
        let fired = stop.wait_for(|requested| *requested).await.is_ok();
        if !fired {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = triggered => {}
        _ = wait_for_signal() => {}
    }
    tracing::info!("Shutdown signal received");
}
