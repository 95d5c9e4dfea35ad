use crate::domain::repository::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{instrument, trace};

/// Process-local store; clones share the same map.
#[derive(Clone)]
pub struct InMemoryKeyValueStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let storage = self.storage.read().await;
        let value = storage.get(key).cloned();
        trace!(key = key, present = value.is_some(), "Read key from memory");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(key.to_string(), value.to_string());
        trace!(key = key, "Wrote key to memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        let mut storage = self.storage.write().await;
        let removed = storage.remove(key).is_some();
        trace!(key = key, removed = removed, "Removed key from memory");
        Ok(())
    }
}
