//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `venmeku_core` linkage without the mobile shell.
//! - Optionally summarize an existing store file passed as the first argument.

use std::process::ExitCode;
use venmeku_core::db::open_db;
use venmeku_core::{
    AccountRepository, RepoError, SessionManager, SessionState, SqliteKvStore, TaskRepository,
};

fn main() -> ExitCode {
    println!("venmeku_core ping={}", venmeku_core::ping());
    println!("venmeku_core version={}", venmeku_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match summarize(&path) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("venmeku_cli: {path}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(path: &str) -> Result<String, RepoError> {
    let conn = open_db(path).map_err(|err| RepoError::Storage(err.into()))?;
    let store = SqliteKvStore::try_new(&conn)?;

    let users = AccountRepository::new(&store).list()?.len();
    let session = match SessionManager::new(&store).state()? {
        SessionState::LoggedIn(name) => name,
        SessionState::LoggedOut => "-".to_string(),
    };
    let tasks = TaskRepository::new(&store).load_all()?;
    let done = tasks.iter().filter(|task| task.done).count();

    Ok(format!(
        "store users={users} session={session} tasks={} done={done}",
        tasks.len()
    ))
}
