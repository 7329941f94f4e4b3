use super::{KvResult, KvStore};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Process-local store backed by an ordered map.
///
/// Used as the test double for repositories and for ephemeral sessions.
/// Not `Sync`; share it by reference within one thread.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set`/`remove` calls observed so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Returns `true` when `key` currently holds a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Snapshot of the stored keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    fn bump_writes(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.bump_writes();
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.entries.borrow_mut().remove(key);
        self.bump_writes();
        Ok(())
    }
}
