//! In-memory secure store used by tests.
//!
//! `MemoryStore` honors the full `SecretStore` contract (replace-on-save,
//! absent-is-`None`, idempotent delete) without touching the OS keyring,
//! and adds test hooks: read/write failure injection and a save counter so
//! tests can assert how often a batch operation persisted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::{PassVaultError, Result};

use super::SecretStore;

#[derive(Default)]
struct Inner {
    items: Mutex<HashMap<(String, String), Vec<u8>>>,
    fail_saves: AtomicBool,
    fail_loads: AtomicBool,
    saves: AtomicUsize,
}

/// In-process fake `SecretStore`. Clones share the same underlying state,
/// so a test can keep a handle after moving a clone into a repository.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one item, e.g. a vault blob in an
    /// old or corrupted format.
    pub fn with_item(bytes: &[u8], account: &str, service: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .items
            .lock()
            .expect("memory store poisoned")
            .insert((account.to_string(), service.to_string()), bytes.to_vec());
        store
    }

    /// When set, every subsequent `save` fails with a store error while
    /// leaving the previously stored value untouched.
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// When set, every subsequent `load` fails with a store error.
    pub fn fail_loads(&self, fail: bool) {
        self.inner.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves across all keys.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }
}

impl SecretStore for MemoryStore {
    fn save(&self, bytes: &[u8], account: &str, service: &str) -> Result<()> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(PassVaultError::Store(
                "write rejected (injected failure)".into(),
            ));
        }

        self.inner
            .items
            .lock()
            .expect("memory store poisoned")
            .insert((account.to_string(), service.to_string()), bytes.to_vec());
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self, account: &str, service: &str) -> Result<Option<Vec<u8>>> {
        if self.inner.fail_loads.load(Ordering::SeqCst) {
            return Err(PassVaultError::Store(
                "read rejected (injected failure)".into(),
            ));
        }

        Ok(self
            .inner
            .items
            .lock()
            .expect("memory store poisoned")
            .get(&(account.to_string(), service.to_string()))
            .cloned())
    }

    fn delete(&self, account: &str, service: &str) -> Result<()> {
        self.inner
            .items
            .lock()
            .expect("memory store poisoned")
            .remove(&(account.to_string(), service.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_replaces_existing_item() {
        let store = MemoryStore::new();
        store.save(b"one", "acct", "svc").unwrap();
        store.save(b"two", "acct", "svc").unwrap();

        assert_eq!(store.load("acct", "svc").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn load_absent_key_is_none_not_error() {
        let store = MemoryStore::new();
        assert_eq!(store.load("nobody", "nothing").unwrap(), None);
    }

    #[test]
    fn delete_absent_key_succeeds() {
        let store = MemoryStore::new();
        store.delete("nobody", "nothing").unwrap();
    }

    #[test]
    fn keys_are_compound() {
        let store = MemoryStore::new();
        store.save(b"a", "acct-1", "svc").unwrap();
        store.save(b"b", "acct-2", "svc").unwrap();

        assert_eq!(store.load("acct-1", "svc").unwrap(), Some(b"a".to_vec()));
        assert_eq!(store.load("acct-2", "svc").unwrap(), Some(b"b".to_vec()));
    }

    #[test]
    fn injected_failure_preserves_old_value() {
        let store = MemoryStore::new();
        store.save(b"kept", "acct", "svc").unwrap();

        store.fail_saves(true);
        let result = store.save(b"dropped", "acct", "svc");
        assert!(result.is_err());

        // The failed write must leave the old value, never garbage.
        assert_eq!(store.load("acct", "svc").unwrap(), Some(b"kept".to_vec()));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.save(b"shared", "acct", "svc").unwrap();

        assert_eq!(handle.load("acct", "svc").unwrap(), Some(b"shared".to_vec()));
    }
}
