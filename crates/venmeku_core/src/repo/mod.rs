//! Repositories over the key-value port.
//!
//! # Responsibility
//! - Own one top-level key each and its read-modify-write cycle.
//! - Translate storage and decoding failures into semantic `RepoError`s.
//!
//! # Invariants
//! - Collections are re-serialized whole after every mutation.
//! - Stored blobs are decoded into typed records; shape mismatches fail.

use crate::kv::KvError;
use crate::model::account::AccountValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_repo;
mod codec;
pub mod session;
pub mod settings_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error taxonomy shared by every repository and service.
#[derive(Debug)]
pub enum RepoError {
    /// Empty or malformed input; the message is user-facing.
    Validation(String),
    DuplicateAccount(String),
    /// Missing users collection or session; the message is user-facing.
    NotFound(String),
    InvalidCredentials,
    Storage(KvError),
    Deserialization { key: String, message: String },
    Serialization { key: String, message: String },
}

impl RepoError {
    /// Stable snake_case code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateAccount(_) => "duplicate_account",
            Self::NotFound(_) => "not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Storage(_) => "storage",
            Self::Deserialization { .. } => "deserialization",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::DuplicateAccount(name) => write!(f, "account already exists: {name}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::InvalidCredentials => write!(f, "Invalid name or password."),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
            Self::Deserialization { key, message } => {
                write!(f, "stored value under `{key}` has an unexpected shape: {message}")
            }
            Self::Serialization { key, message } => {
                write!(f, "failed to encode value for `{key}`: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

impl From<AccountValidationError> for RepoError {
    fn from(value: AccountValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}
