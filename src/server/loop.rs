// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Upper bound on how long shutdown waits for in-flight connections
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept connections on `listener` until `shutdown` is notified, then stop
/// accepting and wait (bounded) for open connections to finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.notified() => break,
        }
    }

    drop(listener);
    drain(&active_connections).await;
    Ok(())
}

async fn drain(active_connections: &AtomicUsize) {
    let waited = tokio::time::timeout(DRAIN_TIMEOUT, async {
        while active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    })
    .await;

    if waited.is_err() {
        logger::log_warning(&format!(
            "Shutting down with {} connection(s) still open",
            active_connections.load(Ordering::SeqCst)
        ));
    }
}
