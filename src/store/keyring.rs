//! OS keyring adapter for the secure store.
//!
//! Stores each item as a binary credential in the operating system's
//! secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! These stores satisfy the accessibility policy this crate requires of
//! its durable layer: items are only readable while the OS session is
//! unlocked, and credential-store items are excluded from cross-device
//! backup/restore. Confidentiality and integrity of the stored bytes are
//! the platform's responsibility — nothing here adds its own cipher.

use keyring::Entry;

use crate::errors::{PassVaultError, Result};

use super::SecretStore;

/// Production `SecretStore` backed by the OS keyring.
///
/// The trait's (account, service) pair maps onto the keyring's
/// (service, user) pair; the keyring guarantees at most one credential
/// per pair and replaces on write.
#[derive(Debug, Clone, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(account: &str, service: &str) -> Result<Entry> {
        Entry::new(service, account).map_err(|e| {
            PassVaultError::Store(format!("failed to create keyring entry: {e}"))
        })
    }
}

impl SecretStore for KeyringStore {
    fn save(&self, bytes: &[u8], account: &str, service: &str) -> Result<()> {
        let entry = Self::entry(account, service)?;

        entry.set_secret(bytes).map_err(|e| {
            PassVaultError::Store(format!("failed to write to keyring: {e}"))
        })
    }

    fn load(&self, account: &str, service: &str) -> Result<Option<Vec<u8>>> {
        let entry = Self::entry(account, service)?;

        match entry.get_secret() {
            Ok(bytes) => Ok(Some(bytes)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(PassVaultError::Store(format!(
                "failed to read from keyring: {e}"
            ))),
        }
    }

    fn delete(&self, account: &str, service: &str) -> Result<()> {
        let entry = Self::entry(account, service)?;

        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already gone, that's fine.
            Err(e) => Err(PassVaultError::Store(format!(
                "failed to delete from keyring: {e}"
            ))),
        }
    }
}
