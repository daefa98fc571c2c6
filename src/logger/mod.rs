//! Logger module
//!
//! One function per loggable event, all emitting structured `tracing` events:
//! - Server lifecycle logging
//! - Access logging (gated by `logging.access_log`)
//! - Dataset load reporting
//! - Error and warning logging

use crate::config::{Config, LoggingConfig};
use hyper::{Method, StatusCode};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set. Should be called once at startup.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("certdir={}", config.level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!(%addr, "CERT directory server started");
    tracing::info!(root = %config.static_files.root, "Serving static assets");
    tracing::info!(path = %config.data.path, prefix = %config.routes.api_prefix, "Serving data API");
    tracing::info!(
        static_ttl_secs = config.cache.static_ttl_secs,
        data_ttl_secs = config.cache.data_ttl_secs,
        "Cache TTLs"
    );
    if let Some(workers) = config.server.workers {
        tracing::info!(workers, "Worker threads");
    }
    tracing::info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(%peer_addr, "Connection accepted");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!(error = ?err, "Failed to serve connection");
}

pub fn log_connection_rejected(active: usize, max: u64) {
    tracing::warn!(active, max, "Max connections reached, connection rejected");
}

pub fn log_request(method: &Method, path: &str, query: Option<&str>) {
    tracing::debug!(%method, path, query, "Request received");
}

/// Access log line, one per response
pub fn log_response(method: &Method, path: &str, status: StatusCode, body_bytes: usize, elapsed: Duration) {
    tracing::info!(
        %method,
        path,
        status = status.as_u16(),
        body_bytes,
        elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        "request"
    );
}

pub fn log_not_found(path: &str) {
    tracing::info!(path, "Not found");
}

pub fn log_spa_fallback(path: &str) {
    tracing::debug!(path, "Serving root document as SPA fallback");
}

pub fn log_dataset_loaded(path: &Path, records: usize) {
    tracing::info!(path = %path.display(), records, "Dataset loaded");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_shutdown(reason: &str) {
    tracing::info!(reason, "Shutting down, no longer accepting connections");
}

pub fn log_server_stopped() {
    tracing::info!("Server stopped");
}
