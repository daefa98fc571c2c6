// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) both request a graceful shutdown.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Spawn a task that notifies `shutdown` on the first termination signal.
///
/// `notify_one` stores a permit, so a signal that arrives before the server loop
/// starts waiting is not lost.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
                wait_for_ctrl_c(shutdown).await;
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => logger::log_shutdown("SIGTERM"),
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => logger::log_shutdown("SIGINT"),
                Err(e) => {
                    logger::log_error(&format!("Failed to listen for SIGINT: {e}"));
                    return;
                }
            },
        }
        shutdown.notify_one();
    });
}

/// Non-Unix fallback: only Ctrl+C is supported
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(wait_for_ctrl_c(shutdown));
}

async fn wait_for_ctrl_c(shutdown: Arc<Notify>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            logger::log_shutdown("SIGINT");
            shutdown.notify_one();
        }
        Err(e) => logger::log_error(&format!("Failed to listen for SIGINT: {e}")),
    }
}
