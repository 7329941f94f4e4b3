//! Use-case API exported to the mobile shell via FRB.
//!
//! # Responsibility
//! - Expose screen-level actions (auth, profile, tasks, settings).
//! - Turn every core error into an alert-ready title and message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Storage-backed functions are not `sync`: FRB runs them off the UI
//!   thread and the shell awaits them as futures.
//! - Each storage-backed call runs its whole read-modify-write under
//!   `STORE_LOCK`, so overlapping calls never interleave writes to a key.
//! - Passwords never leave the core; `AccountView` omits them.

use log::error;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use venmeku_core::db::open_db;
use venmeku_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Account, AuthService, Language, Preferences, ProfileService, RepoError, RepoResult,
    SettingsRepository, SqliteKvStore, Task, TaskRepository,
};

const STORE_FILE_NAME: &str = "venmeku_store.sqlite3";
const STORE_PATH_ENV: &str = "VENMEKU_DB_PATH";
const ERROR_TITLE: &str = "Error";
const SHARE_MESSAGE: &str = "✅ I just completed a task using VenMeku Todo App!";
static STORE_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the store file used by every later call.
///
/// Must run before the first storage call to take effect. Without it the
/// path comes from `VENMEKU_DB_PATH`, then the temp directory.
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = STORE_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Text handed to the native share sheet after a task is completed.
#[flutter_rust_bridge::frb(sync)]
pub fn share_message() -> String {
    SHARE_MESSAGE.to_string()
}

/// Account fields the screens render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub name: String,
    pub email: Option<String>,
    pub photo_uri: Option<String>,
}

/// Response for auth and profile actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub ok: bool,
    /// Current account; `None` on failure or when logged out.
    pub account: Option<AccountView>,
    pub title: String,
    pub message: String,
}

/// Response for actions with no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

/// Task list after the requested action, for a full re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub items: Vec<TaskItem>,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub dark_mode: bool,
    pub notifications: bool,
    pub private_account: bool,
    /// `English` or `Amharic`.
    pub language: String,
}

/// Settings envelope; `settings` holds defaults when loading fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResponse {
    pub ok: bool,
    pub settings: SettingsView,
    pub title: String,
    pub message: String,
}

impl AuthResponse {
    fn success(account: Option<Account>, title: &str, message: &str) -> Self {
        Self {
            ok: true,
            account: account.map(to_account_view),
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn failure(action: &str, err: &RepoError) -> Self {
        let (title, message) = alert_for(action, err);
        Self {
            ok: false,
            account: None,
            title,
            message,
        }
    }
}

impl ActionResponse {
    fn from_result(action: &str, result: RepoResult<()>, title: &str, message: &str) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                title: title.to_string(),
                message: message.to_string(),
            },
            Err(err) => {
                let (title, message) = alert_for(action, &err);
                Self {
                    ok: false,
                    title,
                    message,
                }
            }
        }
    }
}

/// Creates an account and logs it in.
pub fn auth_signup(name: String, password: String) -> AuthResponse {
    match with_store(|store| AuthService::new(store).signup(&name, &password)) {
        Ok(account) => AuthResponse::success(
            Some(account),
            "Success",
            "Account created successfully!",
        ),
        Err(err) => AuthResponse::failure("auth_signup", &err),
    }
}

/// Checks credentials and starts a session.
pub fn auth_login(name: String, password: String) -> AuthResponse {
    match with_store(|store| AuthService::new(store).login(&name, &password)) {
        Ok(account) => {
            AuthResponse::success(Some(account), "Success", "Logged in successfully!")
        }
        Err(err) => AuthResponse::failure("auth_login", &err),
    }
}

/// Ends the session; accounts and tasks are kept.
pub fn auth_logout() -> ActionResponse {
    ActionResponse::from_result(
        "auth_logout",
        with_store(|store| AuthService::new(store).logout()),
        "Logged Out",
        "You have been logged out successfully!",
    )
}

/// Loads the session for screen mount; `account` is `None` when logged out.
pub fn session_current() -> AuthResponse {
    match with_store(|store| AuthService::new(store).current()) {
        Ok(account) => AuthResponse::success(account, "", ""),
        Err(err) => AuthResponse::failure("session_current", &err),
    }
}

/// Applies a picked photo to the session and the stored account.
pub fn profile_change_photo(photo_uri: String) -> AuthResponse {
    match with_store(|store| ProfileService::new(store).change_photo(&photo_uri)) {
        Ok(account) => AuthResponse::success(Some(account), "Profile Photo", "Photo updated."),
        Err(err) => AuthResponse::failure("profile_change_photo", &err),
    }
}

/// Saves the profile editor form.
pub fn profile_save(name: String, email: String, photo_uri: Option<String>) -> AuthResponse {
    match with_store(|store| ProfileService::new(store).save_profile(&name, &email, photo_uri)) {
        Ok(account) => AuthResponse::success(
            Some(account),
            "Saved",
            "Your profile changes have been saved!",
        ),
        Err(err) => AuthResponse::failure("profile_save", &err),
    }
}

pub fn tasks_load() -> TaskListResponse {
    task_list("tasks_load", |_| Ok(()))
}

/// Adds a task; blank text leaves the list unchanged.
pub fn tasks_add(text: String) -> TaskListResponse {
    task_list("tasks_add", |repo| repo.add(&text).map(drop))
}

pub fn tasks_update(id: i64, text: String) -> TaskListResponse {
    task_list("tasks_update", |repo| repo.update(id, &text).map(drop))
}

pub fn tasks_remove(id: i64) -> TaskListResponse {
    task_list("tasks_remove", |repo| repo.remove(id).map(drop))
}

pub fn tasks_toggle_done(id: i64) -> TaskListResponse {
    task_list("tasks_toggle_done", |repo| repo.toggle_done(id).map(drop))
}

pub fn tasks_clear_completed() -> TaskListResponse {
    task_list("tasks_clear_completed", |repo| {
        repo.clear_completed().map(drop)
    })
}

pub fn settings_load() -> SettingsResponse {
    settings_response(
        "settings_load",
        with_store(|store| SettingsRepository::new(store).load()),
    )
}

/// Persists the settings screen toggles.
///
/// An unknown `language` label is rejected with a validation alert.
pub fn settings_save(settings: SettingsView) -> SettingsResponse {
    let result = to_preferences(&settings).and_then(|preferences| {
        with_store(|store| {
            SettingsRepository::new(store).save(&preferences)?;
            Ok(preferences)
        })
    });
    settings_response("settings_save", result)
}

fn task_list(
    action: &str,
    mutate: impl FnOnce(&TaskRepository<&SqliteKvStore<'_>>) -> RepoResult<()>,
) -> TaskListResponse {
    let result = with_store(|store| {
        let repo = TaskRepository::new(store);
        mutate(&repo)?;
        repo.load_all()
    });
    match result {
        Ok(tasks) => TaskListResponse {
            ok: true,
            items: tasks.into_iter().map(to_task_item).collect(),
            title: String::new(),
            message: String::new(),
        },
        Err(err) => {
            let (title, message) = alert_for(action, &err);
            TaskListResponse {
                ok: false,
                items: Vec::new(),
                title,
                message,
            }
        }
    }
}

fn settings_response(action: &str, result: RepoResult<Preferences>) -> SettingsResponse {
    match result {
        Ok(preferences) => SettingsResponse {
            ok: true,
            settings: to_settings_view(&preferences),
            title: String::new(),
            message: String::new(),
        },
        Err(err) => {
            let (title, message) = alert_for(action, &err);
            SettingsResponse {
                ok: false,
                settings: to_settings_view(&Preferences::default()),
                title,
                message,
            }
        }
    }
}

/// Maps an error to the alert the shell shows.
///
/// Storage and decoding failures are logged and shown generically.
fn alert_for(action: &str, err: &RepoError) -> (String, String) {
    let message = match err {
        RepoError::Validation(_) | RepoError::NotFound(_) | RepoError::InvalidCredentials => {
            err.to_string()
        }
        RepoError::DuplicateAccount(_) => "User already exists. Please log in.".to_string(),
        RepoError::Storage(_)
        | RepoError::Deserialization { .. }
        | RepoError::Serialization { .. } => {
            error!(
                "event={action} module=ffi status=error error_code={} error={err}",
                err.code()
            );
            format!("An error occurred during {}.", action_label(action))
        }
    };
    (ERROR_TITLE.to_string(), message)
}

fn action_label(action: &str) -> &'static str {
    match action {
        "auth_signup" => "signup",
        "auth_login" => "login",
        "auth_logout" => "logout",
        "profile_change_photo" | "profile_save" | "session_current" => "profile update",
        "settings_load" | "settings_save" => "settings update",
        _ => "task update",
    }
}

fn resolve_store_path() -> PathBuf {
    STORE_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_FILE_NAME)
        })
        .clone()
}

/// Runs one user action against the store, serialized with every other action.
///
/// The guard is only `()`, so a poisoned lock carries no broken state and is
/// recovered.
fn with_store<T>(f: impl FnOnce(&SqliteKvStore<'_>) -> RepoResult<T>) -> RepoResult<T> {
    let _guard = STORE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let conn = open_db(resolve_store_path())
        .map_err(|err| RepoError::Storage(err.into()))?;
    let store = SqliteKvStore::try_new(&conn)?;
    f(&store)
}

fn to_account_view(account: Account) -> AccountView {
    AccountView {
        name: account.name,
        email: account.email,
        photo_uri: account.photo_uri,
    }
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id,
        text: task.text,
        done: task.done,
    }
}

fn to_settings_view(preferences: &Preferences) -> SettingsView {
    SettingsView {
        dark_mode: preferences.dark_mode,
        notifications: preferences.notifications,
        private_account: preferences.private_account,
        language: preferences.language.label().to_string(),
    }
}

fn to_preferences(view: &SettingsView) -> RepoResult<Preferences> {
    let language = Language::from_label(&view.language).ok_or_else(|| {
        RepoError::Validation(format!("Unsupported language `{}`.", view.language))
    })?;
    Ok(Preferences {
        dark_mode: view.dark_mode,
        notifications: view.notifications,
        private_account: view.private_account,
        language,
    })
}
