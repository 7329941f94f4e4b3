//! Preferences repository over the `@settings` key.

use super::codec::{load_json, store_json};
use super::RepoResult;
use crate::kv::KvStore;
use crate::model::preferences::Preferences;

pub const SETTINGS_KEY: &str = "@settings";

pub struct SettingsRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> SettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved preferences, or defaults when never saved.
    pub fn load(&self) -> RepoResult<Preferences> {
        Ok(load_json::<Preferences>(&self.store, SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, preferences: &Preferences) -> RepoResult<()> {
        store_json(&self.store, SETTINGS_KEY, preferences)
    }
}
