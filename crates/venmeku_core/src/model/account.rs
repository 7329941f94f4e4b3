//! Account record and credential validation.
//!
//! # Invariants
//! - `name` is the identity key; comparison is exact and case-sensitive.
//! - `password` is plaintext; only minimum length is checked, and only at signup.
//! - `photoUri` is always written (as `null` when unset); `email` is omitted when unset.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum password length accepted by signup.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A local identity with credentials and profile fields.
///
/// The same shape is stored in the `users` collection and, as a cached
/// copy of one entry, under the `user` session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: String,
    /// Profile-only writes in older builds dropped this field.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub photo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Account {
    /// Creates a fresh account as signup stores it: no photo, no email.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            photo_uri: None,
            email: None,
        }
    }

    /// Exact, case-sensitive credential match.
    pub fn matches_credentials(&self, name: &str, password: &str) -> bool {
        self.name == name && self.password == password
    }
}

/// Reasons signup/login/profile input is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    MissingCredentials,
    PasswordTooShort { min: usize, actual: usize },
    MissingProfileFields,
    InvalidEmail(String),
}

impl Display for AccountValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "Please enter both name and password."),
            Self::PasswordTooShort { min, .. } => {
                write!(f, "Password must be at least {min} characters long.")
            }
            Self::MissingProfileFields => write!(f, "Name and Email cannot be empty."),
            Self::InvalidEmail(value) => write!(f, "`{value}` is not a valid email address."),
        }
    }
}

impl Error for AccountValidationError {}

/// Checks that both credentials are present.
pub fn validate_credentials(name: &str, password: &str) -> Result<(), AccountValidationError> {
    if name.is_empty() || password.is_empty() {
        return Err(AccountValidationError::MissingCredentials);
    }
    Ok(())
}

/// Signup rules: both fields present, password at least `MIN_PASSWORD_CHARS`.
pub fn validate_signup(name: &str, password: &str) -> Result<(), AccountValidationError> {
    validate_credentials(name, password)?;
    let actual = password.chars().count();
    if actual < MIN_PASSWORD_CHARS {
        return Err(AccountValidationError::PasswordTooShort {
            min: MIN_PASSWORD_CHARS,
            actual,
        });
    }
    Ok(())
}

/// Profile editor rules, applied to already-trimmed input.
pub fn validate_profile(name: &str, email: &str) -> Result<(), AccountValidationError> {
    if name.is_empty() || email.is_empty() {
        return Err(AccountValidationError::MissingProfileFields);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(AccountValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}
