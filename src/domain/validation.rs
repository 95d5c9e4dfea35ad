use crate::domain::user::{LoginRequest, SignupRequest};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Terms,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::Terms => "terms",
        };
        f.write_str(name)
    }
}

/// A message attached to one form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw login form input, before trimming.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Raw signup form input, before trimming.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Weighted 0..=100 score: length, mixed case, digits and symbols.
pub fn password_strength(password: &str) -> u8 {
    let length = password.chars().count();
    let mut strength: u8 = 0;

    if length >= 8 {
        strength += 25;
    }
    if length >= 12 {
        strength += 25;
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        strength += 25;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 15;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 10;
    }

    strength.min(100)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthBand {
    VeryWeak,
    Weak,
    Medium,
    Strong,
}

impl StrengthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..25 => StrengthBand::VeryWeak,
            25..50 => StrengthBand::Weak,
            50..75 => StrengthBand::Medium,
            _ => StrengthBand::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthBand::VeryWeak => "Very weak",
            StrengthBand::Weak => "Weak",
            StrengthBand::Medium => "Medium",
            StrengthBand::Strong => "Strong",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StrengthBand::VeryWeak => "#ef4444",
            StrengthBand::Weak => "#f59e0b",
            StrengthBand::Medium => "#eab308",
            StrengthBand::Strong => "#22c55e",
        }
    }
}

/// What a strength indicator needs to draw itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthMeter {
    pub score: u8,
    pub band: StrengthBand,
}

impl StrengthMeter {
    pub fn measure(password: &str) -> Self {
        let score = password_strength(password);
        Self {
            score,
            band: StrengthBand::from_score(score),
        }
    }
}

fn check_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::new(FormField::Email, "Email address is required"));
    }
    if !is_valid_email(email) {
        return Err(FieldError::new(
            FormField::Email,
            "Enter a valid email address",
        ));
    }
    Ok(())
}

/// Checks a login form; the first failing rule wins.
pub fn validate_login(form: &LoginForm) -> Result<LoginRequest, FieldError> {
    let email = form.email.trim();
    check_email(email)?;
    if form.password.is_empty() {
        return Err(FieldError::new(FormField::Password, "Password is required"));
    }

    Ok(LoginRequest {
        email: email.to_string(),
        password: form.password.clone(),
        remember_me: form.remember_me,
    })
}

/// Checks a signup form; the first failing rule wins.
pub fn validate_signup(form: &SignupForm) -> Result<SignupRequest, FieldError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(FieldError::new(FormField::Name, "Full name is required"));
    }
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(FieldError::new(
            FormField::Name,
            "Full name must be at least 2 characters",
        ));
    }

    let email = form.email.trim();
    check_email(email)?;

    if form.password.is_empty() {
        return Err(FieldError::new(FormField::Password, "Password is required"));
    }
    if form.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(FieldError::new(
            FormField::Password,
            "Password must be at least 8 characters",
        ));
    }
    if form.password != form.confirm_password {
        return Err(FieldError::new(
            FormField::ConfirmPassword,
            "Passwords do not match",
        ));
    }
    if !form.accept_terms {
        return Err(FieldError::new(
            FormField::Terms,
            "You must accept the terms of use",
        ));
    }

    Ok(SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
    })
}
