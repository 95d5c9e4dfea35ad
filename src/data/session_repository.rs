use crate::domain::repository::{CURRENT_USER_KEY, KeyValueStore, SessionRepository};
use crate::domain::user::SessionUser;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// The logged-in user kept as one JSON object under the `currentUser` key.
#[derive(Clone)]
pub struct KvSessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for KvSessionRepository {
    #[instrument(skip(self))]
    async fn current(&self) -> Result<Option<SessionUser>> {
        let session = match self.store.get(CURRENT_USER_KEY).await? {
            // a stored `null` counts as logged out
            Some(raw) => serde_json::from_str::<Option<SessionUser>>(&raw).with_context(|| {
                format!("stored value under {:?} is not a session", CURRENT_USER_KEY)
            })?,
            None => None,
        };
        trace!(present = session.is_some(), "Session loaded");
        Ok(session)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn set(&self, user: SessionUser) -> Result<()> {
        let json = serde_json::to_string(&user).context("failed to serialize session")?;
        self.store.set(CURRENT_USER_KEY, &json).await?;
        debug!(user_id = %user.id, remember_me = user.remember_me, "Session stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY).await?;
        debug!("Session cleared");
        Ok(())
    }
}
