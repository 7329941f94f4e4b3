//! Local persistence and session core for the VenMeku Todo app.
//! Accounts, the current session, tasks and preferences all live in one
//! injected key-value store as JSON values.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use kv::{KvError, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountValidationError, MIN_PASSWORD_CHARS};
pub use model::preferences::{Language, Preferences};
pub use model::task::{Clock, SystemClock, Task, TaskId, TASK_TEXT_MAX_CHARS};
pub use repo::account_repo::AccountRepository;
pub use repo::session::{SessionManager, SessionState};
pub use repo::settings_repo::SettingsRepository;
pub use repo::task_repo::TaskRepository;
pub use repo::{RepoError, RepoResult};
pub use service::auth_service::AuthService;
pub use service::profile_service::ProfileService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
