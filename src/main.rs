use std::sync::Arc;

mod config;
mod http;
mod logger;
mod rest;
mod server;

const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // First argument: config file path (extension optional)
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Create Tokio runtime, sized by the workers setting when present
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, config_path))
}

async fn async_main(
    cfg: config::Config,
    config_path: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    // Reloads swap the snapshot but never the listener limits
    let performance = cfg.performance;

    let state = Arc::new(config::AppState::new(cfg, config_path));
    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals))?;

    server::run_server(listener, state, signals, performance).await?;
    logger::log_info("Server stopped");
    Ok(())
}
