//! Session manager over the `user` key.
//!
//! # Invariants
//! - The session is a cached copy of one users-collection entry, never the
//!   source of truth.
//! - Ending a session removes only the `user` key.

use super::codec::{load_json, store_json};
use super::{RepoError, RepoResult};
use crate::kv::KvStore;
use crate::model::account::Account;
use log::info;

/// Storage key of the current session.
pub const SESSION_KEY: &str = "user";

/// `NotFound` message for operations that need a logged-in account.
pub const NO_SESSION_MESSAGE: &str = "No active session. Please log in first.";

/// `LoggedOut -> LoggedIn -> LoggedOut`; no intermediate states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(String),
}

pub struct SessionManager<S: KvStore> {
    store: S,
}

impl<S: KvStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn start_session(&self, account: &Account) -> RepoResult<()> {
        store_json(&self.store, SESSION_KEY, account)?;
        info!("event=session_start module=session status=ok");
        Ok(())
    }

    pub fn current_session(&self) -> RepoResult<Option<Account>> {
        load_json(&self.store, SESSION_KEY)
    }

    pub fn end_session(&self) -> RepoResult<()> {
        self.store.remove(SESSION_KEY)?;
        info!("event=session_end module=session status=ok");
        Ok(())
    }

    pub fn state(&self) -> RepoResult<SessionState> {
        Ok(match self.current_session()? {
            Some(account) => SessionState::LoggedIn(account.name),
            None => SessionState::LoggedOut,
        })
    }

    /// Sets `photoUri` on the stored session and returns the updated copy.
    ///
    /// Only the session key is written; `ProfileService::change_photo`
    /// carries the change over to the users collection.
    ///
    /// # Errors
    /// - `NotFound` when nobody is logged in.
    pub fn update_session_photo(&self, uri: &str) -> RepoResult<Account> {
        let mut account = self
            .current_session()?
            .ok_or_else(|| RepoError::NotFound(NO_SESSION_MESSAGE.to_string()))?;
        account.photo_uri = Some(uri.to_string());
        store_json(&self.store, SESSION_KEY, &account)?;
        Ok(account)
    }
}
