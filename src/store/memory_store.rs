use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::Storage;
use crate::errors::SessionError;

/// Slots held in process memory. Used for throwaway sessions and as the
/// fake store in tests.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written slot.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.slots().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.slots().remove(key);
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("token").unwrap(), None);

        store.set_item("token", "abc").unwrap();
        assert_eq!(store.get_item("token").unwrap(), Some("abc".to_string()));
        assert_eq!(store.len(), 1);

        store.remove_item("token").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_remove_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove_item("user").is_ok());
        assert!(store.remove_item("user").is_ok());
    }
}
