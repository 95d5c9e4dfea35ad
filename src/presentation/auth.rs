use crate::application::auth_service::{AuthService, Navigation};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::user::SessionUser;
use crate::domain::validation::{
    FieldError, LoginForm, SignupForm, StrengthMeter, validate_login, validate_signup,
};
use crate::presentation::handlers::UiError;
use crate::presentation::view::{HeaderState, ViewEvent, ViewObserver};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Outcome of a form submission as the view sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResult {
    fn success(user: SessionUser) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            message: Some(message.into()),
        }
    }
}

/// Binds the login/signup forms and the header to the auth service.
pub struct AuthController<U: UserRepository, S: SessionRepository> {
    auth_service: Arc<AuthService<U, S>>,
    observer: Arc<dyn ViewObserver>,
}

impl<U: UserRepository, S: SessionRepository> AuthController<U, S> {
    pub fn new(auth_service: Arc<AuthService<U, S>>, observer: Arc<dyn ViewObserver>) -> Self {
        Self {
            auth_service,
            observer,
        }
    }

    fn reject(&self, field_error: FieldError) -> AuthResult {
        let message = field_error.message.clone();
        self.observer.notify(ViewEvent::FieldError(field_error));
        AuthResult::failure(message)
    }

    fn accept(&self, user: SessionUser) -> AuthResult {
        self.observer
            .notify(ViewEvent::Header(HeaderState::from_session(Some(&user))));
        self.observer.notify(ViewEvent::Navigate(Navigation::Landing));
        AuthResult::success(user)
    }

    /// Maps a service error: field-level failures are shown, the rest are returned.
    fn handle_error(&self, err: anyhow::Error) -> Result<AuthResult, UiError> {
        let err = UiError::from(err);
        err.log();
        match err {
            UiError::Field(field_error) => Ok(self.reject(field_error)),
            other => Err(other),
        }
    }

    #[instrument(skip(self, form))]
    pub async fn submit_login(&self, form: LoginForm) -> Result<AuthResult, UiError> {
        let req = match validate_login(&form) {
            Ok(req) => req,
            Err(field_error) => return Ok(self.reject(field_error)),
        };
        info!(email = %req.email, "Login submitted");

        match self.auth_service.login(req).await {
            Ok(user) => Ok(self.accept(user)),
            Err(e) => self.handle_error(e),
        }
    }

    #[instrument(skip(self, form))]
    pub async fn submit_signup(&self, form: SignupForm) -> Result<AuthResult, UiError> {
        let req = match validate_signup(&form) {
            Ok(req) => req,
            Err(field_error) => return Ok(self.reject(field_error)),
        };
        info!(email = %req.email, "Signup submitted");

        match self.auth_service.signup(req).await {
            Ok(user) => Ok(self.accept(user)),
            Err(e) => self.handle_error(e),
        }
    }

    /// Re-scores the password field on every keystroke.
    pub fn password_input(&self, password: &str) -> StrengthMeter {
        let meter = StrengthMeter::measure(password);
        self.observer.notify(ViewEvent::PasswordStrength(meter));
        meter
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), UiError> {
        let navigation = self.auth_service.logout().await.map_err(|e| {
            error!(error = %e, "Failed to log out");
            UiError::from(e)
        })?;
        self.observer
            .notify(ViewEvent::Header(HeaderState::from_session(None)));
        self.observer.notify(ViewEvent::Navigate(navigation));
        Ok(())
    }

    /// Emits the header for whoever is currently logged in.
    pub async fn refresh_header(&self) -> Result<HeaderState, UiError> {
        let session = self.auth_service.current_user().await.map_err(|e| {
            error!(error = %e, "Failed to read session");
            UiError::from(e)
        })?;
        let header = HeaderState::from_session(session.as_ref());
        self.observer.notify(ViewEvent::Header(header.clone()));
        Ok(header)
    }
}
