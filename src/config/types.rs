// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Main configuration structure
///
/// A loaded `Config` is treated as an immutable snapshot. Reloads build a new
/// value and swap it in whole (see [`super::AppState`]).
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub http: HttpConfig,
    /// Re-streamers keyed by their unique id, iterated in ascending id order.
    /// Read from `[[restreamers]]` entries so ids keep their case.
    #[serde(default, deserialize_with = "deserialize_restreamers")]
    pub restreamers: BTreeMap<String, ReStreamer>,
}

/// Server configuration - changes require a restart
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

/// Performance configuration - changes require a restart
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Emit `Access-Control-Allow-Origin: *` on API responses.
    /// Defaults to on for debug builds only.
    #[serde(default = "default_allow_any_origin")]
    pub allow_any_origin: bool,
}

#[allow(clippy::missing_const_for_fn)]
fn default_allow_any_origin() -> bool {
    cfg!(debug_assertions)
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: default_allow_any_origin(),
        }
    }
}

/// A single re-streamer. The id is the key it is stored under.
#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct ReStreamer {
    /// Origin address being re-streamed
    pub source: String,
    #[serde(default)]
    pub description: String,
    /// Publishing secret; only its presence is ever reported
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl std::fmt::Debug for ReStreamer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReStreamer")
            .field("source", &self.source)
            .field("description", &self.description)
            .field("key", &if self.key.is_empty() { "" } else { "<redacted>" })
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

/// One `[[restreamers]]` table as written in the file
#[derive(Deserialize)]
struct ReStreamerEntry {
    id: String,
    source: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    key: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn deserialize_restreamers<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, ReStreamer>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<ReStreamerEntry>::deserialize(deserializer)?;
    let mut restreamers = BTreeMap::new();
    for entry in entries {
        let restreamer = ReStreamer {
            source: entry.source,
            description: entry.description,
            key: entry.key,
            enabled: entry.enabled,
        };
        if restreamers.insert(entry.id.clone(), restreamer).is_some() {
            return Err(serde::de::Error::custom(format!(
                "duplicate re-streamer id '{}'",
                entry.id
            )));
        }
    }
    Ok(restreamers)
}
