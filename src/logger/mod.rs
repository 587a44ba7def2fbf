//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Level-filtered error, warning and debug logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, ReloadSummary};
use chrono::Local;
use std::net::SocketAddr;
use std::str::FromStr;

/// Severity threshold, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(format!("Unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warn => write!(f, "WARN"),
            Self::Info => write!(f, "INFO"),
            Self::Debug => write!(f, "DEBUG"),
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level: LogLevel = config.logging.level.parse().map_err(|e: String| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn enabled(level: LogLevel) -> bool {
    let threshold = writer::get().map_or(LogLevel::Info, writer::LogWriter::level);
    level <= threshold
}

fn stamp(level: LogLevel, message: &str) -> String {
    format!("{} [{level}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
}

/// Write to info/access log
fn write_info(message: &str) {
    if !enabled(LogLevel::Info) {
        return;
    }
    let line = stamp(LogLevel::Info, message);
    match writer::get() {
        Some(w) => w.write_info(&line),
        None => println!("{line}"),
    }
}

/// Write to error log
fn write_error(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }
    let line = stamp(level, message);
    match writer::get() {
        Some(w) => w.write_error(&line),
        None => eprintln!("{line}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Re-streamer API server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Streamers endpoint: http://{addr}/api/streamers"));
    write_info(&format!("Log level: {}", config.logging.level));
    write_info(&format!("Configured re-streamers: {}", config.restreamers.len()));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if config.http.allow_any_origin {
        write_info("CORS: any origin allowed");
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(LogLevel::Error, &format!("Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, message);
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, message);
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_debug(message: &str) {
    if !enabled(LogLevel::Debug) {
        return;
    }
    let line = stamp(LogLevel::Debug, message);
    match writer::get() {
        Some(w) => w.write_info(&line),
        None => println!("{line}"),
    }
}

pub fn log_config_reloaded(summary: &ReloadSummary) {
    write_info(&format!(
        "[Config] Reloaded: {} re-streamer(s) configured",
        summary.restreamers
    ));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}
