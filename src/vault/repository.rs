//! The vault's single owner: in-memory state plus the durable blob.
//!
//! `VaultRepository` holds the authoritative [`VaultPayload`], serializes
//! every mutation behind one mutex, and is the only writer of the
//! secure-store item. The discipline:
//!
//! - **Load once** at construction. Absence, unreadable bytes, and store
//!   failures all resolve to a usable vault (empty credentials, seed
//!   categories), so opening never fails; [`LoadOutcome`] records which
//!   case happened.
//! - **Mutate and persist under the lock.** Read-modify-encode-write is
//!   not atomic on its own, so the whole sequence runs while the state
//!   mutex is held. Observers are notified after the lock is released.
//! - **Persist failures keep the edit.** On a store error the in-memory
//!   state stays the source of truth for the session and the error goes
//!   back to the caller, so the UI can report that the change was not
//!   saved.
//! - **Never write at load time.** An unreadable blob stays on the store
//!   untouched until the first successful mutation overwrites it.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::codec::{self, WireShape};
use super::model::{seed_categories, Category, Credential, NewCredential, VaultPayload};
use crate::errors::Result;
use crate::store::{SecretStore, SERVICE};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Account half of the blob's compound key; the service half is
/// [`crate::store::SERVICE`].
pub const VAULT_ACCOUNT: &str = "vault";

// ---------------------------------------------------------------------------
// LoadOutcome
// ---------------------------------------------------------------------------

/// How the one-time load at construction resolved.
///
/// Every case yields a working vault; this only records the path taken so
/// the frontend can surface the interesting ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No blob existed. First run.
    Fresh,
    /// A current-format blob decoded cleanly.
    Loaded,
    /// A legacy-format blob decoded; it is rewritten in the current
    /// format by the next successful mutation.
    Migrated,
    /// A blob existed but neither format could read it. The bytes stay
    /// on the store untouched until the next successful mutation.
    RecoveredUnreadable,
    /// The secure store refused the read; the session runs on a fresh
    /// vault and saves will retry the store.
    StoreUnavailable,
}

// ---------------------------------------------------------------------------
// VaultRepository
// ---------------------------------------------------------------------------

type SnapshotObserver = Arc<dyn Fn(&VaultPayload) + Send + Sync>;

/// Owner of the in-memory vault and sole writer of the durable blob.
///
/// All methods take `&self`; an internal mutex serializes mutations.
pub struct VaultRepository<S> {
    store: S,
    state: Mutex<VaultPayload>,
    observers: Mutex<Vec<SnapshotObserver>>,
    outcome: LoadOutcome,
}

impl<S: SecretStore> VaultRepository<S> {
    /// Open the vault, performing the one-time load.
    ///
    /// Never fails and never writes: every load problem collapses to a
    /// fresh in-memory vault, with the distinction kept in
    /// [`LoadOutcome`] for diagnostics.
    pub fn new(store: S) -> Self {
        let (payload, outcome) = Self::initial_state(&store);
        Self {
            store,
            state: Mutex::new(payload),
            observers: Mutex::new(Vec::new()),
            outcome,
        }
    }

    fn initial_state(store: &S) -> (VaultPayload, LoadOutcome) {
        let bytes = match store.load(VAULT_ACCOUNT, SERVICE) {
            Ok(Some(bytes)) => Zeroizing::new(bytes),
            Ok(None) => return (fresh_payload(), LoadOutcome::Fresh),
            Err(_) => return (fresh_payload(), LoadOutcome::StoreUnavailable),
        };

        match codec::decode(&bytes) {
            Ok(decoded) => {
                let mut payload = decoded.payload;
                // "No categories persisted yet" counts as a first run for
                // categories only, whichever shape the blob had.
                if payload.categories.is_empty() {
                    payload.categories = seed_categories();
                }
                let outcome = match decoded.shape {
                    WireShape::Current => LoadOutcome::Loaded,
                    WireShape::Legacy => LoadOutcome::Migrated,
                };
                (payload, outcome)
            }
            Err(_) => (fresh_payload(), LoadOutcome::RecoveredUnreadable),
        }
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// A point-in-time clone of the whole vault.
    pub fn snapshot(&self) -> VaultPayload {
        self.lock_state().clone()
    }

    /// How construction resolved the initial load.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// Register an observer invoked with a fresh snapshot after every
    /// applied mutation (including ones whose persist failed — the
    /// in-memory state did change).
    pub fn subscribe(&self, observer: impl Fn(&VaultPayload) + Send + Sync + 'static) {
        self.lock_observers().push(Arc::new(observer));
    }

    // ── Credential operations ──────────────────────────────────────────

    /// Add a credential. The repository assigns the id and both
    /// timestamps itself and inserts at position 0 (most recent first).
    ///
    /// On a store failure the credential is still in the session vault;
    /// the error tells the caller durability was not achieved.
    pub fn add_credential(&self, new: NewCredential) -> Result<Credential> {
        let mut state = self.lock_state();
        let now = Utc::now();
        let credential = Credential {
            id: Uuid::new_v4(),
            title: new.title,
            username: new.username,
            password: new.password,
            notes: new.notes,
            category_id: new.category_id,
            created_at: now,
            updated_at: now,
        };
        state.credentials.insert(0, credential.clone());

        let persisted = self.persist(&state);
        self.finish(state);
        persisted.map(|()| credential)
    }

    /// Replace the credential with `credential.id`. The stored id and
    /// `created_at` are retained and `updated_at` is set to now, so the
    /// caller cannot rewrite identity or creation time.
    ///
    /// Unknown ids are a no-op returning `Ok(false)` — stale references
    /// are not an error.
    pub fn update_credential(&self, credential: Credential) -> Result<bool> {
        let mut state = self.lock_state();
        let Some(stored) = state
            .credentials
            .iter_mut()
            .find(|c| c.id == credential.id)
        else {
            return Ok(false);
        };

        stored.title = credential.title;
        stored.username = credential.username;
        stored.password = credential.password;
        stored.notes = credential.notes;
        stored.category_id = credential.category_id;
        stored.updated_at = Utc::now();

        let persisted = self.persist(&state);
        self.finish(state);
        persisted.map(|()| true)
    }

    /// Remove every credential whose id appears in `ids`, persisting once
    /// for the whole batch. Returns how many were removed; ids with no
    /// match are skipped.
    pub fn delete_credentials(&self, ids: &[Uuid]) -> Result<usize> {
        let mut state = self.lock_state();
        let before = state.credentials.len();
        state.credentials.retain(|c| !ids.contains(&c.id));
        let removed = before - state.credentials.len();
        if removed == 0 {
            return Ok(0);
        }

        let persisted = self.persist(&state);
        self.finish(state);
        persisted.map(|()| removed)
    }

    /// Remove credentials by position in the current order, persisting
    /// once for the whole batch. Positions refer to the state at call
    /// time; removal runs in descending order so earlier removals cannot
    /// shift the later ones. Out-of-range positions are skipped.
    pub fn delete_at(&self, positions: &[usize]) -> Result<usize> {
        let mut state = self.lock_state();
        let mut order = positions.to_vec();
        order.sort_unstable();
        order.dedup();

        let mut removed = 0;
        for position in order.into_iter().rev() {
            if position < state.credentials.len() {
                state.credentials.remove(position);
                removed += 1;
            }
        }
        if removed == 0 {
            return Ok(0);
        }

        let persisted = self.persist(&state);
        self.finish(state);
        persisted.map(|()| removed)
    }

    // ── Category operations ────────────────────────────────────────────

    /// Add a user category (`is_system = false`) and persist.
    pub fn add_category(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Category> {
        let category = Category::new(name, description, false);
        let mut state = self.lock_state();
        state.categories.push(category.clone());

        let persisted = self.persist(&state);
        self.finish(state);
        persisted.map(|()| category)
    }

    /// Replace the category with `category.id`, retaining the stored
    /// `created_at` and `is_system`. Unknown ids are a no-op returning
    /// `Ok(false)`.
    pub fn update_category(&self, category: Category) -> Result<bool> {
        let mut state = self.lock_state();
        let Some(stored) = state.categories.iter_mut().find(|c| c.id == category.id) else {
            return Ok(false);
        };

        stored.name = category.name;
        stored.description = category.description;

        let persisted = self.persist(&state);
        self.finish(state);
        persisted.map(|()| true)
    }

    /// Remove a category and detach every credential referencing it
    /// (`category_id` cleared, `updated_at` bumped) as one transaction:
    /// both effects land in memory before the single persist. Unknown
    /// ids are a no-op returning `Ok(false)`.
    pub fn delete_category(&self, id: Uuid) -> Result<bool> {
        let mut state = self.lock_state();
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Ok(false);
        }

        let now = Utc::now();
        for credential in state
            .credentials
            .iter_mut()
            .filter(|c| c.category_id == Some(id))
        {
            credential.category_id = None;
            credential.updated_at = now;
        }

        let persisted = self.persist(&state);
        self.finish(state);
        persisted.map(|()| true)
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Encode the payload and replace the durable blob. Called with the
    /// state mutex held.
    fn persist(&self, payload: &VaultPayload) -> Result<()> {
        let bytes = Zeroizing::new(codec::encode(payload)?);
        self.store.save(&bytes, VAULT_ACCOUNT, SERVICE)
    }

    /// Release the state lock, then notify observers with the snapshot.
    /// The observer list is cloned out of its lock first, so callbacks
    /// hold no repository lock and may call back in, `subscribe` included.
    fn finish(&self, state: MutexGuard<'_, VaultPayload>) {
        let snapshot = state.clone();
        drop(state);
        let observers: Vec<SnapshotObserver> = self.lock_observers().clone();
        for observer in &observers {
            observer(&snapshot);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, VaultPayload> {
        // A poisoned lock still holds a valid payload.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<SnapshotObserver>> {
        self.observers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn fresh_payload() -> VaultPayload {
    VaultPayload {
        credentials: Vec::new(),
        categories: seed_categories(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sample(title: &str) -> NewCredential {
        NewCredential {
            title: title.to_string(),
            username: "user@example.com".to_string(),
            password: "pw".to_string(),
            notes: None,
            category_id: None,
        }
    }

    #[test]
    fn empty_store_loads_fresh_with_seed_categories() {
        let repo = VaultRepository::new(MemoryStore::new());

        assert_eq!(repo.load_outcome(), LoadOutcome::Fresh);
        let snapshot = repo.snapshot();
        assert!(snapshot.credentials.is_empty());
        assert_eq!(snapshot.categories.len(), 4);
    }

    #[test]
    fn fresh_load_writes_nothing_back() {
        let store = MemoryStore::new();
        let _repo = VaultRepository::new(store.clone());

        assert_eq!(store.save_count(), 0);
        assert!(store.load(VAULT_ACCOUNT, SERVICE).unwrap().is_none());
    }

    #[test]
    fn legacy_blob_reports_migrated_and_gets_seeds() {
        let repo = VaultRepository::new(MemoryStore::new());
        let added = repo.add_credential(sample("Gmail")).unwrap();
        let legacy = serde_json::to_vec(&vec![added]).unwrap();

        let store = MemoryStore::with_item(&legacy, VAULT_ACCOUNT, SERVICE);
        let migrated = VaultRepository::new(store);

        assert_eq!(migrated.load_outcome(), LoadOutcome::Migrated);
        let snapshot = migrated.snapshot();
        assert_eq!(snapshot.credentials.len(), 1);
        assert_eq!(snapshot.categories.len(), 4);
    }

    #[test]
    fn unreadable_blob_recovers_fresh_without_destroying_it() {
        let store = MemoryStore::with_item(b"\x00corrupt", VAULT_ACCOUNT, SERVICE);
        let repo = VaultRepository::new(store.clone());

        assert_eq!(repo.load_outcome(), LoadOutcome::RecoveredUnreadable);
        assert!(repo.snapshot().credentials.is_empty());
        // The corrupt bytes are untouched until a mutation succeeds.
        assert_eq!(
            store.load(VAULT_ACCOUNT, SERVICE).unwrap().as_deref(),
            Some(&b"\x00corrupt"[..])
        );

        repo.add_credential(sample("Gmail")).unwrap();
        let rewritten = store.load(VAULT_ACCOUNT, SERVICE).unwrap().unwrap();
        assert_ne!(rewritten.as_slice(), &b"\x00corrupt"[..]);
    }

    #[test]
    fn store_read_failure_still_opens_a_usable_vault() {
        let store = MemoryStore::new();
        store.fail_loads(true);
        let repo = VaultRepository::new(store);

        assert_eq!(repo.load_outcome(), LoadOutcome::StoreUnavailable);
        assert!(repo.snapshot().credentials.is_empty());
        assert_eq!(repo.snapshot().categories.len(), 4);
    }

    #[test]
    fn persisted_categories_are_not_reseeded() {
        let store = MemoryStore::new();
        {
            let seeded = VaultRepository::new(store.clone());
            seeded.add_category("Travel", None).unwrap();
        }
        let reopened = VaultRepository::new(store);

        assert_eq!(reopened.load_outcome(), LoadOutcome::Loaded);
        let names: Vec<String> = reopened
            .snapshot()
            .categories
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert!(names.contains(&"Travel".to_string()));
        assert_eq!(names.len(), 5);
    }
}
