// Configuration module entry point
// Loads the configuration snapshot and manages runtime reloads

mod state;
mod types;

use std::net::SocketAddr;

use config::ConfigError;

use crate::logger::LogLevel;

// Re-export public types
pub use state::{AppState, ReloadSummary};
pub use types::{Config, PerformanceConfig, ReStreamer};

/// Prefix for environment overrides, e.g. `RESTREAMER_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "RESTREAMER";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, ENV_PREFIX)
    }

    fn load_with_env(config_path: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.allow_any_origin", cfg!(debug_assertions))?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject entries the API could not report sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging
            .level
            .parse::<LogLevel>()
            .map_err(ConfigError::Message)?;

        for (id, restreamer) in &self.restreamers {
            if id.is_empty() {
                return Err(ConfigError::Message(
                    "re-streamer id must not be empty".to_string(),
                ));
            }
            if id.contains('/') {
                return Err(ConfigError::Message(format!(
                    "re-streamer id '{id}' must not contain '/'"
                )));
            }
            if restreamer.source.trim().is_empty() {
                return Err(ConfigError::Message(format!(
                    "re-streamer '{id}' has an empty source"
                )));
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
impl Config {
    /// Build a snapshot with default settings around the given re-streamers
    pub fn with_restreamers<I>(restreamers: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, ReStreamer)>,
    {
        use types::{HttpConfig, LoggingConfig, ServerConfig};

        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                allow_any_origin: false,
            },
            restreamers: restreamers
                .into_iter()
                .map(|(id, r)| (id.to_string(), r))
                .collect(),
        }
    }
}
