// Application state module
// Holds the current configuration snapshot and swaps it on reload

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use config::ConfigError;

use super::types::Config;
use crate::logger;

/// Application state
///
/// Readers take an `Arc<Config>` and keep it for the rest of their request,
/// so a concurrent reload never changes what an in-flight request sees.
pub struct AppState {
    config_path: String,
    snapshot: RwLock<Arc<Config>>,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
}

/// Outcome of a successful reload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadSummary {
    pub restreamers: usize,
    /// Listener or log output settings changed but only take effect after a restart
    pub restart_required: bool,
}

impl AppState {
    pub fn new(config: Config, config_path: impl Into<String>) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config_path: config_path.into(),
            snapshot: RwLock::new(Arc::new(config)),
            cached_access_log,
        }
    }

    /// Current configuration snapshot
    pub async fn snapshot(&self) -> Arc<Config> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Re-read the configuration file and swap the snapshot.
    /// The previous snapshot stays active if loading or validation fails.
    pub async fn reload(&self) -> Result<ReloadSummary, ConfigError> {
        let new_config = Config::load_from(&self.config_path)?;
        Ok(self.replace(new_config).await)
    }

    /// Install a new snapshot
    pub async fn replace(&self, new_config: Config) -> ReloadSummary {
        let new_config = Arc::new(new_config);
        let old_config = {
            let mut guard = self.snapshot.write().await;
            std::mem::replace(&mut *guard, Arc::clone(&new_config))
        };

        self.update_cache(&new_config);

        let restart_required = needs_restart(&old_config, &new_config);
        if restart_required {
            logger::log_warning("Listener or log output settings changed; restart to apply them");
        }

        ReloadSummary {
            restreamers: new_config.restreamers.len(),
            restart_required,
        }
    }

    /// Update cached configuration values
    fn update_cache(&self, new_config: &Config) {
        self.cached_access_log
            .store(new_config.logging.access_log, Ordering::Relaxed);
    }
}

/// Settings fixed when the listener and the log writer are set up
fn needs_restart(old: &Config, new: &Config) -> bool {
    old.server != new.server
        || old.performance != new.performance
        || old.logging.level != new.logging.level
        || old.logging.access_log_file != new.logging.access_log_file
        || old.logging.error_log_file != new.logging.error_log_file
}
