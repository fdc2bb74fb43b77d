//! Secure store module — durable byte storage behind the OS credential store.
//!
//! This module provides:
//! - The `SecretStore` trait: exactly-one-item semantics per
//!   (account, service) key with atomic replace (`mod` root)
//! - `KeyringStore`, the production adapter over the OS keyring (`keyring`)
//! - `MemoryStore`, an in-process fake for tests (`memory`)

pub mod keyring;
pub mod memory;

// Re-export the most commonly used items.
pub use keyring::KeyringStore;
pub use memory::MemoryStore;

use crate::errors::Result;

/// Service name under which every PassVault item lives in the secure store.
pub const SERVICE: &str = "passvault";

/// Durable key/value byte storage with exactly-one-item semantics per
/// (account, service) pair.
///
/// Implementations must guarantee that `save` is a replace: a failed write
/// leaves either the previous value or no value, never corrupt bytes. The
/// item's absence is a normal outcome, not an error — `load` reports it as
/// `Ok(None)` and `delete` treats it as success.
pub trait SecretStore {
    /// Replace any existing item for the key with `bytes`.
    fn save(&self, bytes: &[u8], account: &str, service: &str) -> Result<()>;

    /// Return the bytes for the key, or `None` if no item exists.
    fn load(&self, account: &str, service: &str) -> Result<Option<Vec<u8>>>;

    /// Remove the item. Removing an absent item is a success (idempotent).
    fn delete(&self, account: &str, service: &str) -> Result<()>;
}
