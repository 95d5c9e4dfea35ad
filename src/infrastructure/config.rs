use crate::data::file::FileKeyValueStore;
use crate::data::memory::InMemoryKeyValueStore;
use crate::domain::repository::KeyValueStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const STORE_DIR_VAR: &str = "INSIGHT_STORE_DIR";
pub const SEARCH_DEBOUNCE_VAR: &str = "INSIGHT_SEARCH_DEBOUNCE_MS";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Profile directory for the file-backed store; `None` keeps everything in memory.
    pub store_dir: Option<PathBuf>,
    pub search_debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            info!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_dir = lookup(STORE_DIR_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let debounce_ms = match lookup(SEARCH_DEBOUNCE_VAR) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|e| {
                warn!(
                    value = %raw,
                    error = %e,
                    default = DEFAULT_SEARCH_DEBOUNCE_MS,
                    "Invalid {SEARCH_DEBOUNCE_VAR}, using default"
                );
                DEFAULT_SEARCH_DEBOUNCE_MS
            }),
            None => DEFAULT_SEARCH_DEBOUNCE_MS,
        };

        let config = Self {
            store_dir,
            search_debounce: Duration::from_millis(debounce_ms),
        };
        info!(
            store_dir = ?config.store_dir,
            search_debounce_ms = debounce_ms,
            "Configuration loaded"
        );
        config
    }

    /// Builds the key-value backend this configuration names.
    pub fn open_store(&self) -> Arc<dyn KeyValueStore> {
        match &self.store_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using file-backed store");
                Arc::new(FileKeyValueStore::new(dir.clone()))
            }
            None => {
                info!("Using in-memory store");
                Arc::new(InMemoryKeyValueStore::new())
            }
        }
    }
}
