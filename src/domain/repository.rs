use crate::domain::user::{SessionUser, UserRecord};
use anyhow::Result;
use async_trait::async_trait;

/// Storage key holding the JSON array of user records.
pub const USERS_KEY: &str = "users";
/// Storage key holding the JSON session object.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// String-to-string store with whole-value overwrites.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn list(&self) -> Result<Vec<UserRecord>>;
    async fn append(&self, record: UserRecord) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn current(&self) -> Result<Option<SessionUser>>;
    async fn set(&self, user: SessionUser) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}
