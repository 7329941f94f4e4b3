//! Key-value storage port.
//!
//! # Responsibility
//! - Define the `get/set/remove` capability every repository is built on.
//! - Keep the backend (SQLite file, in-memory map) swappable per caller.
//!
//! # Invariants
//! - Each call is atomic for its single key.
//! - Nothing is transactional across keys; callers sequence their writes.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Backend failure surfaced by a `KvStore` implementation.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is at schema version {actual_version}, expected {expected_version}; open it through db::open_db"
            ),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed storage capability injected into repositories.
pub trait KvStore {
    /// Returns the stored value, or `None` when the key was never set or removed.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Inserts or overwrites the value for `key`.
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> KvResult<()>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key)
    }
}
