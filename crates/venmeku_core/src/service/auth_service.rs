//! Signup, login and logout flows.

use crate::kv::KvStore;
use crate::model::account::Account;
use crate::repo::account_repo::AccountRepository;
use crate::repo::session::{SessionManager, SessionState};
use crate::repo::RepoResult;
use log::warn;

pub struct AuthService<'a, S: KvStore> {
    accounts: AccountRepository<&'a S>,
    sessions: SessionManager<&'a S>,
}

impl<'a, S: KvStore> AuthService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            accounts: AccountRepository::new(store),
            sessions: SessionManager::new(store),
        }
    }

    /// Creates the account and logs it in.
    ///
    /// A failed signup leaves the session untouched.
    pub fn signup(&self, name: &str, password: &str) -> RepoResult<Account> {
        let account = self
            .accounts
            .signup(name, password)
            .inspect_err(|err| log_rejected("signup", err.code()))?;
        self.sessions.start_session(&account)?;
        Ok(account)
    }

    /// Checks credentials and starts a session for the matching account.
    pub fn login(&self, name: &str, password: &str) -> RepoResult<Account> {
        let account = self
            .accounts
            .login(name, password)
            .inspect_err(|err| log_rejected("login", err.code()))?;
        self.sessions.start_session(&account)?;
        Ok(account)
    }

    /// Ends the session; stored accounts are kept.
    pub fn logout(&self) -> RepoResult<()> {
        self.sessions.end_session()
    }

    pub fn current(&self) -> RepoResult<Option<Account>> {
        self.sessions.current_session()
    }

    pub fn state(&self) -> RepoResult<SessionState> {
        self.sessions.state()
    }
}

fn log_rejected(action: &str, code: &str) {
    warn!("event={action} module=auth status=rejected error_code={code}");
}
