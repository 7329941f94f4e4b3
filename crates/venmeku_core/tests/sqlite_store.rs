use rusqlite::Connection;
use venmeku_core::db::migrations::latest_version;
use venmeku_core::db::{open_db, open_db_in_memory, DbError};
use venmeku_core::{AuthService, KvError, KvStore, SqliteKvStore, TaskRepository};

#[test]
fn in_memory_db_has_kv_table() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn set_overwrites_and_remove_deletes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.get("user").unwrap(), None);
    store.set("user", "a").unwrap();
    store.set("user", "b").unwrap();
    assert_eq!(store.get("user").unwrap().as_deref(), Some("b"));

    store.remove("user").unwrap();
    store.remove("user").unwrap();
    assert_eq!(store.get("user").unwrap(), None);
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("venmeku.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();
        AuthService::new(&store).signup("alice", "secret1").unwrap();
        TaskRepository::new(&store).add("Buy milk").unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let auth = AuthService::new(&store);
    assert_eq!(auth.current().unwrap().unwrap().name, "alice");
    auth.logout().unwrap();
    assert!(auth.login("alice", "secret1").is_ok());
    assert_eq!(TaskRepository::new(&store).load_all().unwrap().len(), 4);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::StoreTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unopenable_path_reports_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("venmeku.sqlite3");

    match open_db(&path).unwrap_err() {
        DbError::Open { mode, .. } => assert_eq!(mode, "file"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    match SqliteKvStore::try_new(&conn) {
        Err(KvError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
