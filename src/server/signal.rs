// Signal handling module
//
// Supported signals:
// - SIGHUP:  Reload configuration
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

/// Notifications raised by process signals
#[derive(Default)]
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Notify,
    /// Reload signal (SIGHUP)
    pub reload: Notify,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Register signal handlers and forward them to `handler` from a background task.
///
/// Registration happens before this returns so failures reach the caller.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    crate::logger::log_info(&format!(
        "[SIGNAL] SIGHUP reloads configuration, SIGTERM/SIGINT shut down (pid {})",
        std::process::id()
    ));

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    crate::logger::log_info("[SIGNAL] SIGHUP received, reloading configuration");
                    handler.reload.notify_one();
                }
                _ = sigterm.recv() => {
                    crate::logger::log_info("[SIGNAL] SIGTERM received, shutting down");
                    handler.shutdown.notify_one();
                    break;
                }
                _ = sigint.recv() => {
                    crate::logger::log_info("[SIGNAL] SIGINT received, shutting down");
                    handler.shutdown.notify_one();
                    break;
                }
            }
        }
    });

    Ok(())
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_info("[SIGNAL] Ctrl+C received, shutting down");
            handler.shutdown.notify_one();
        }
    });
    Ok(())
}
