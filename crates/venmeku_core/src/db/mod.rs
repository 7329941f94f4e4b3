//! SQLite bootstrap for the durable key-value backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections for VenMeku core.
//! - Create the `kv_entries` table through versioned migrations.
//!
//! # Invariants
//! - Table layout version is tracked via `PRAGMA user_version`.
//! - No key-value read/write happens before migrations succeed.
//! - A database written by a newer binary is rejected, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or preparing the store file.
#[derive(Debug)]
pub enum DbError {
    /// The connection itself could not be established.
    Open {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// A statement failed on an open connection.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build; it is left untouched.
    StoreTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { mode, source } => write!(f, "cannot open {mode} store: {source}"),
            Self::Sqlite(err) => write!(f, "store query failed: {err}"),
            Self::StoreTooNew { found, supported } => write!(
                f,
                "store layout v{found} comes from a newer app version (this build reads up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::StoreTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
