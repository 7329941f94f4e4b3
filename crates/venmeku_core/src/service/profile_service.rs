//! Profile edits that must reach both the session and the users collection.
//!
//! # Responsibility
//! - Provide the one photo-change routine used by the profile and home screens.
//! - Save name/email edits without losing the stored password.
//!
//! # Invariants
//! - Every mutation requires an active session.
//! - The users collection is written with the same values as the session.

use crate::kv::KvStore;
use crate::model::account::{validate_profile, Account};
use crate::repo::account_repo::AccountRepository;
use crate::repo::session::{SessionManager, NO_SESSION_MESSAGE};
use crate::repo::{RepoError, RepoResult};
use log::info;

pub struct ProfileService<'a, S: KvStore> {
    accounts: AccountRepository<&'a S>,
    sessions: SessionManager<&'a S>,
}

impl<'a, S: KvStore> ProfileService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            accounts: AccountRepository::new(store),
            sessions: SessionManager::new(store),
        }
    }

    /// Sets the profile photo on the session, then on the matching account.
    ///
    /// # Errors
    /// - `Validation` when `uri` is blank.
    /// - `NotFound` when nobody is logged in.
    pub fn change_photo(&self, uri: &str) -> RepoResult<Account> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(RepoError::Validation(
                "Please choose a photo first.".to_string(),
            ));
        }

        let session = self.sessions.update_session_photo(uri)?;
        self.accounts.update_photo(&session.name, uri)?;
        info!("event=change_photo module=profile status=ok");
        Ok(session)
    }

    /// Saves name, email and photo from the profile editor.
    ///
    /// Name and email are trimmed. The users record stored under the previous
    /// session name is replaced first, so a rename onto a taken name fails
    /// before the session is touched.
    ///
    /// # Errors
    /// - `Validation` for empty fields or an implausible email.
    /// - `NotFound` when nobody is logged in.
    /// - `DuplicateAccount` when the new name belongs to another account.
    pub fn save_profile(
        &self,
        name: &str,
        email: &str,
        photo_uri: Option<String>,
    ) -> RepoResult<Account> {
        let name = name.trim();
        let email = email.trim();
        validate_profile(name, email)?;

        let current = self
            .sessions
            .current_session()?
            .ok_or_else(|| RepoError::NotFound(NO_SESSION_MESSAGE.to_string()))?;

        let updated = Account {
            name: name.to_string(),
            password: current.password.clone(),
            photo_uri: photo_uri.filter(|uri| !uri.trim().is_empty()),
            email: Some(email.to_string()),
        };
        self.accounts.replace(&current.name, &updated)?;
        self.sessions.start_session(&updated)?;
        info!(
            "event=save_profile module=profile status=ok renamed={}",
            current.name != updated.name
        );
        Ok(updated)
    }
}
