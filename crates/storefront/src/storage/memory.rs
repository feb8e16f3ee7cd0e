//! In-memory store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] held in memory.
///
/// Nothing survives the process. Used by tests and by embedders that keep
/// their own persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Copy of every entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if a writer panicked.
    pub fn snapshot(&self) -> Result<HashMap<String, String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.clone())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        for &(key, value) in pairs {
            entries.insert(key.to_owned(), value.to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cartData").unwrap(), None);

        store.set("cartData", "{}").unwrap();
        assert_eq!(store.get("cartData").unwrap().as_deref(), Some("{}"));

        store.set("cartData", "[]").unwrap();
        assert_eq!(store.get("cartData").unwrap().as_deref(), Some("[]"));

        store.remove("cartData").unwrap();
        assert_eq!(store.get("cartData").unwrap(), None);

        // Removing again is fine.
        store.remove("cartData").unwrap();
    }

    #[test]
    fn test_with_entries_and_snapshot() {
        let store = MemoryStore::with_entries([("isAuth", "true"), ("authToken", "t")]);
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("authToken").map(String::as_str), Some("t"));
    }
}
