use crate::domain::repository::{KeyValueStore, USERS_KEY, UserRepository};
use crate::domain::user::UserRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, trace};

/// User records kept as one JSON array under the `users` key.
///
/// Clones share one append lock, so concurrent appends in this process never
/// overwrite each other's read-modify-write.
#[derive(Clone)]
pub struct KvUserRepository {
    store: Arc<dyn KeyValueStore>,
    append_lock: Arc<Mutex<()>>,
}

impl KvUserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn save_all(&self, records: &[UserRecord]) -> Result<()> {
        let json = serde_json::to_string(records).context("failed to serialize user records")?;
        self.store.set(USERS_KEY, &json).await
    }
}

#[async_trait]
impl UserRepository for KvUserRepository {
    #[instrument(skip(self))]
    async fn initialize(&self) -> Result<()> {
        if self.store.get(USERS_KEY).await?.is_none() {
            debug!("Initializing empty user store");
            self.save_all(&[]).await?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<UserRecord>> {
        trace!("Loading user records");
        let records = match self.store.get(USERS_KEY).await? {
            Some(raw) => serde_json::from_str::<Vec<UserRecord>>(&raw)
                .with_context(|| format!("stored value under {:?} is not a user list", USERS_KEY))?,
            None => Vec::new(),
        };
        trace!(count = records.len(), "User records loaded");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(user_id = %record.id, email = %record.email))]
    async fn append(&self, record: UserRecord) -> Result<()> {
        let _guard = self.append_lock.lock().await;
        let mut records = self.list().await?;
        records.push(record);
        self.save_all(&records).await?;
        debug!(count = records.len(), "User record appended");
        Ok(())
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user = self.list().await?.into_iter().find(|u| u.email == email);
        match &user {
            Some(u) => {
                debug!(user_id = %u.id, email = %u.email, "User found in store");
            }
            None => {
                trace!(email = email, "User not found in store");
            }
        }
        Ok(user)
    }
}
