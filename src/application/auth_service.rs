use crate::domain::error::DomainError;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::user::{LoginRequest, SessionUser, SignupRequest, UserRecord};
use crate::infrastructure::security::{hash_password, verify_password, verify_unknown_account};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// Where the view should go after an auth action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Landing,
}

pub struct AuthService<U: UserRepository, S: SessionRepository> {
    users: Arc<U>,
    sessions: Arc<S>,
    // held from the duplicate-email check until the record is appended
    signup_lock: Mutex<()>,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub fn new(users: Arc<U>, sessions: Arc<S>) -> Self {
        Self {
            users,
            sessions,
            signup_lock: Mutex::new(()),
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn signup(&self, req: SignupRequest) -> Result<SessionUser> {
        trace!("Starting signup");

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let guard = self.signup_lock.lock().await;
        if self.users.find_by_email(&req.email).await?.is_some() {
            warn!(email = %req.email, "Email already registered");
            return Err(DomainError::EmailInUse.into());
        }

        let record = UserRecord {
            id: Uuid::now_v7().to_string(),
            name: req.name,
            email: req.email,
            password_hash,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        debug!(user_id = %record.id, "Appending user record");
        self.users.append(record.clone()).await?;
        drop(guard);

        // new accounts are logged in straight away
        let session = SessionUser::project(&record, true);
        self.sessions.set(session.clone()).await?;

        info!(user_id = %record.id, email = %record.email, "User signed up");
        Ok(session)
    }

    #[instrument(skip(self, req), fields(email = %req.email, remember_me = req.remember_me))]
    pub async fn login(&self, req: LoginRequest) -> Result<SessionUser> {
        trace!("Starting login");

        let Some(record) = self.users.find_by_email(&req.email).await? else {
            verify_unknown_account(&req.password).map_err(|e| {
                error!(error = %e, "Failed to verify password");
                DomainError::Internal(format!("Failed to verify password: {}", e))
            })?;
            warn!(email = %req.email, "Unknown email during login");
            return Err(DomainError::InvalidCredentials.into());
        };

        let is_valid = verify_password(&req.password, &record.password_hash).map_err(|e| {
            error!(user_id = %record.id, error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %record.id, "Invalid password during login");
            return Err(DomainError::InvalidCredentials.into());
        }

        let session = SessionUser::project(&record, req.remember_me);
        self.sessions.set(session.clone()).await?;

        info!(user_id = %record.id, email = %record.email, "Login successful");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<Navigation> {
        self.sessions.clear().await?;
        info!("Logged out");
        Ok(Navigation::Landing)
    }

    pub async fn current_user(&self) -> Result<Option<SessionUser>> {
        self.sessions.current().await
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.sessions.current().await?.is_some())
    }
}
