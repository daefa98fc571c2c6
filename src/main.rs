use std::sync::Arc;
use tokio::sync::Notify;

use certdir::config::{AppState, Config};
use certdir::{logger, server};

/// Configuration file used when none is given, resolved without extension
const DEFAULT_CONFIG: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    // Create Tokio runtime, sized by `server.workers` when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    let state = Arc::new(AppState::new(cfg));

    // Warm the dataset cache; a failure here is logged and retried per request
    if let Err(e) = state.data.snapshot().await {
        logger::log_warning(&format!("Dataset not loaded at startup: {e}"));
    }

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));
    server::start_server_loop(listener, state, shutdown).await?;

    logger::log_server_stopped();
    Ok(())
}
