//! Vault module — the data model and its single durable blob.
//!
//! This module provides:
//! - `Credential`, `Category`, and `VaultPayload` types (`model`)
//! - Blob encoding with the legacy-format decode fallback (`codec`)
//! - `VaultRepository`, the owner of in-memory state and sole writer of
//!   the secure-store blob (`repository`)

pub mod codec;
pub mod model;
pub mod repository;

// Re-export the most commonly used items.
pub use model::{seed_categories, Category, Credential, NewCredential, VaultPayload};
pub use repository::{LoadOutcome, VaultRepository, VAULT_ACCOUNT};
