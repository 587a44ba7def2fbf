// Server loop module
// Accepts connections until shutdown, reloading configuration on request

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::{AppState, PerformanceConfig};
use crate::logger;

/// Run the accept loop.
///
/// Returns `Ok(())` once a shutdown is signalled. Connections already being
/// served finish in their own tasks. `performance` is the startup value and
/// is not affected by reloads.
pub async fn run_server(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
    performance: PerformanceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            performance,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.reload.notified() => {
                match state.reload().await {
                    Ok(summary) => logger::log_config_reloaded(&summary),
                    Err(e) => logger::log_error(&format!(
                        "Configuration reload failed, keeping previous configuration: {e}"
                    )),
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_info(&format!(
                    "Shutting down listener on {}",
                    listener.local_addr()?
                ));
                return Ok(());
            }
        }
    }
}
