use super::{KvError, KvResult, KvStore};
use crate::db::migrations::{current_user_version, latest_version};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Durable store over the `kv_entries` table.
///
/// Borrows a connection produced by `db::open_db` / `db::open_db_in_memory`.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `KvError::UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(KvError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        debug!(
            "event=kv_get module=kv status=ok key={key} hit={}",
            value.is_some()
        );
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        debug!(
            "event=kv_set module=kv status=ok key={key} bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        debug!("event=kv_remove module=kv status=ok key={key} removed={changed}");
        Ok(())
    }
}
