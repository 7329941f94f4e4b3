//! Account repository over the `users` key.
//!
//! # Responsibility
//! - Create accounts and check credentials.
//! - Keep profile fields (photo, name, email) of stored accounts current.
//!
//! # Invariants
//! - At most one record per distinct `name`.
//! - Signup validates input before reading storage.
//! - Last write wins; a single writer per device is assumed.

use super::codec::{load_json, store_json};
use super::{RepoError, RepoResult};
use crate::kv::KvStore;
use crate::model::account::{validate_credentials, validate_signup, Account};
use log::{info, warn};

/// Storage key of the users collection.
pub const USERS_KEY: &str = "users";

pub struct AccountRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> AccountRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new account with no photo.
    ///
    /// # Errors
    /// - `Validation` for empty input or a password under six characters.
    /// - `DuplicateAccount` when `name` is already taken, whatever the password.
    pub fn signup(&self, name: &str, password: &str) -> RepoResult<Account> {
        validate_signup(name, password)?;

        let mut users = self.list()?;
        if users.iter().any(|account| account.name == name) {
            info!("event=signup module=accounts status=rejected reason=duplicate");
            return Err(RepoError::DuplicateAccount(name.to_string()));
        }

        let account = Account::new(name, password);
        users.push(account.clone());
        self.persist(&users)?;
        info!(
            "event=signup module=accounts status=ok users={}",
            users.len()
        );
        Ok(account)
    }

    /// Returns the account matching both credentials exactly.
    ///
    /// # Errors
    /// - `Validation` when either field is empty.
    /// - `NotFound` when no account was ever created.
    /// - `InvalidCredentials` when nothing matches.
    pub fn login(&self, name: &str, password: &str) -> RepoResult<Account> {
        validate_credentials(name, password)?;

        let users = self.list()?;
        if users.is_empty() {
            return Err(RepoError::NotFound(
                "No users found. Please sign up first.".to_string(),
            ));
        }

        users
            .into_iter()
            .find(|account| account.matches_credentials(name, password))
            .ok_or(RepoError::InvalidCredentials)
    }

    /// Sets `photoUri` on the account called `name`.
    ///
    /// When the collection is missing or has no such account, the collection
    /// is replaced by a single entry holding only `name` and the photo.
    pub fn update_photo(&self, name: &str, uri: &str) -> RepoResult<()> {
        let mut users = self.list()?;
        match users.iter_mut().find(|account| account.name == name) {
            Some(account) => {
                account.photo_uri = Some(uri.to_string());
                self.persist(&users)
            }
            None => {
                warn!(
                    "event=update_photo module=accounts status=fallback dropped_users={}",
                    users.len()
                );
                let mut account = Account::new(name, "");
                account.photo_uri = Some(uri.to_string());
                self.persist(std::slice::from_ref(&account))
            }
        }
    }

    /// Looks up one account by exact name.
    pub fn find(&self, name: &str) -> RepoResult<Option<Account>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|account| account.name == name))
    }

    /// All stored accounts in creation order; empty when never written.
    pub fn list(&self) -> RepoResult<Vec<Account>> {
        Ok(load_json::<Vec<Account>>(&self.store, USERS_KEY)?.unwrap_or_default())
    }

    /// Replaces the record stored under `previous_name` with `account`.
    ///
    /// Appends when `previous_name` is unknown, so a profile saved after a
    /// lost users collection is recreated instead of dropped.
    ///
    /// # Errors
    /// - `DuplicateAccount` when renaming onto another existing account.
    pub fn replace(&self, previous_name: &str, account: &Account) -> RepoResult<()> {
        let mut users = self.list()?;
        let renamed = account.name != previous_name;
        if renamed && users.iter().any(|existing| existing.name == account.name) {
            return Err(RepoError::DuplicateAccount(account.name.clone()));
        }

        match users
            .iter_mut()
            .find(|existing| existing.name == previous_name)
        {
            Some(existing) => *existing = account.clone(),
            None => users.push(account.clone()),
        }
        self.persist(&users)?;
        info!("event=account_replace module=accounts status=ok renamed={renamed}");
        Ok(())
    }

    fn persist(&self, users: &[Account]) -> RepoResult<()> {
        store_json(&self.store, USERS_KEY, users)
    }
}
