use crate::domain::error::DomainError;
use crate::domain::validation::{FieldError, FormField};
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to the view layer.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("{0}")]
    Field(FieldError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UiError {
    /// Business failures are shown next to a form field; everything else is not.
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            UiError::Field(e) => Some(e),
            _ => None,
        }
    }

    pub fn log(&self) {
        match self {
            UiError::Field(e) => warn!(field = %e.field, message = %e.message, "Form rejected"),
            UiError::NotFound(msg) => warn!(error = %msg, "Resource not found"),
            UiError::Storage(msg) => error!(error = %msg, "Storage error"),
            UiError::Internal(msg) => error!(error = %msg, "Internal error"),
        }
    }
}

impl From<anyhow::Error> for UiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            // login failures are reported under the password input
            Some(DomainError::InvalidCredentials) => UiError::Field(FieldError::new(
                FormField::Password,
                DomainError::InvalidCredentials.to_string(),
            )),
            Some(DomainError::EmailInUse) => UiError::Field(FieldError::new(
                FormField::Email,
                DomainError::EmailInUse.to_string(),
            )),
            Some(DomainError::NotFound(msg)) => UiError::NotFound(msg.clone()),
            Some(DomainError::Internal(msg)) => UiError::Internal(msg.clone()),
            None => UiError::Storage(format!("{:#}", err)),
        }
    }
}
