//! JSON encoding between typed records and stored strings.

use super::{RepoError, RepoResult};
use crate::kv::KvStore;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Loads and decodes `key`; `None` when the key holds nothing.
pub(crate) fn load_json<T: DeserializeOwned>(
    store: &impl KvStore,
    key: &str,
) -> RepoResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|err| {
        warn!(
            "event=decode module=repo status=error key={key} line={} column={}",
            err.line(),
            err.column()
        );
        RepoError::Deserialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    })
}

/// Encodes `value` and overwrites `key`.
pub(crate) fn store_json<T: Serialize + ?Sized>(
    store: &impl KvStore,
    key: &str,
    value: &T,
) -> RepoResult<()> {
    let raw = serde_json::to_string(value).map_err(|err| RepoError::Serialization {
        key: key.to_string(),
        message: err.to_string(),
    })?;
    store.set(key, &raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_json, store_json};
    use crate::kv::{KvStore, MemoryKvStore};
    use crate::repo::RepoError;

    #[test]
    fn missing_key_decodes_to_none() {
        let store = MemoryKvStore::new();
        let loaded: Option<Vec<i64>> = load_json(&store, "@tasks").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn shape_mismatch_is_typed_error() {
        let store = MemoryKvStore::new();
        store.set("@tasks", r#"{"not":"a list"}"#).unwrap();
        let err = load_json::<Vec<i64>>(&store, "@tasks").unwrap_err();
        assert!(matches!(err, RepoError::Deserialization { ref key, .. } if key == "@tasks"));
    }

    #[test]
    fn stored_value_decodes_back() {
        let store = MemoryKvStore::new();
        store_json(&store, "numbers", &[1, 2, 3]).unwrap();
        let loaded: Option<Vec<i64>> = load_json(&store, "numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
