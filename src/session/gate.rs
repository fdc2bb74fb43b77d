//! The interactive strong-authentication gate.
//!
//! A [`Gate`] performs one challenge against the user and yields a plain
//! boolean. The contract is deliberately narrow:
//!
//! - `true` only on a verified success;
//! - every negative outcome (nothing enrolled, cancelled prompt, wrong
//!   phrase, platform failure) collapses to `false` — callers must not
//!   assume a richer error taxonomy;
//! - at most one prompt is ever live; a challenge arriving while another
//!   is pending returns `false` without prompting.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::Result;
use crate::store::{SecretStore, SERVICE};

/// Account under which the enrolled phrase digest lives in the secure
/// store. Distinct from the vault blob's account.
pub const GATE_ACCOUNT: &str = "gate-phrase";

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// One interactive strong-authentication challenge.
///
/// `challenge` may block for human-scale time while the user responds.
pub trait Gate {
    /// Run one challenge, showing `reason` to the user. Never panics and
    /// never returns an error: anything short of verified success is
    /// `false`.
    fn challenge(&self, reason: &str) -> bool;
}

// Lets a shared gate be handed to the session guard while the owner
// keeps a handle on it.
impl<G: Gate + ?Sized> Gate for Arc<G> {
    fn challenge(&self, reason: &str) -> bool {
        (**self).challenge(reason)
    }
}

// ---------------------------------------------------------------------------
// PromptGate
// ---------------------------------------------------------------------------

/// Terminal stand-in for a device-credential check.
///
/// An unlock phrase is enrolled once; only its SHA-256 digest is kept, in
/// the secure store under [`GATE_ACCOUNT`]. A challenge asks for the
/// phrase with a hidden prompt (the challenge reason is the prompt text)
/// and compares digests in constant time. With no enrollment the
/// mechanism counts as unavailable and every challenge fails without
/// prompting.
pub struct PromptGate<S> {
    store: S,
    pending: AtomicBool,
}

impl<S: SecretStore> PromptGate<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            pending: AtomicBool::new(false),
        }
    }

    /// Whether an unlock phrase is currently enrolled.
    pub fn is_enrolled(&self) -> bool {
        self.stored_digest().is_some()
    }

    /// Enroll `phrase`, replacing any previous enrollment. Only the
    /// digest is stored; the phrase itself never leaves this call.
    pub fn enroll(&self, phrase: &str) -> Result<()> {
        let digest = digest(phrase);
        self.store.save(&digest, GATE_ACCOUNT, SERVICE)
    }

    /// Remove the enrollment. Removing a non-existent one is a success.
    pub fn clear_enrollment(&self) -> Result<()> {
        self.store.delete(GATE_ACCOUNT, SERVICE)
    }

    fn stored_digest(&self) -> Option<Vec<u8>> {
        // A store read failure reads as "nothing enrolled": the gate
        // reports unavailable rather than erroring.
        self.store.load(GATE_ACCOUNT, SERVICE).ok().flatten()
    }

    fn verify_phrase(&self, phrase: &str) -> bool {
        let Some(stored) = self.stored_digest() else {
            return false;
        };
        digest(phrase).as_slice().ct_eq(stored.as_slice()).into()
    }

    fn run_prompt(&self, reason: &str) -> bool {
        if !self.is_enrolled() {
            return false;
        }

        let phrase = match dialoguer::Password::new().with_prompt(reason).interact() {
            Ok(phrase) => Zeroizing::new(phrase),
            // Cancelled or no usable terminal: a normal negative outcome.
            Err(_) => return false,
        };

        self.verify_phrase(&phrase)
    }
}

impl<S: SecretStore> Gate for PromptGate<S> {
    fn challenge(&self, reason: &str) -> bool {
        if self.pending.swap(true, Ordering::SeqCst) {
            // A prompt is already on screen; never surface a second one.
            return false;
        }

        let verified = self.run_prompt(reason);
        self.pending.store(false, Ordering::SeqCst);
        verified
    }
}

/// SHA-256 digest of an unlock phrase.
fn digest(phrase: &str) -> [u8; 32] {
    Sha256::digest(phrase.as_bytes()).into()
}

// ---------------------------------------------------------------------------
// ScriptedGate
// ---------------------------------------------------------------------------

/// Test gate answering challenges from a programmed sequence.
///
/// Records every challenge reason so tests can assert whether (and how
/// often) the gate was consulted. A challenge past the end of the script
/// answers `false`, like any other negative outcome.
pub struct ScriptedGate {
    answers: Mutex<VecDeque<bool>>,
    reasons: Mutex<Vec<String>>,
}

impl ScriptedGate {
    pub fn answering<I: IntoIterator<Item = bool>>(answers: I) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            reasons: Mutex::new(Vec::new()),
        }
    }

    /// How many challenges have been issued.
    pub fn calls(&self) -> usize {
        self.reasons.lock().expect("scripted gate poisoned").len()
    }

    /// The reasons passed to each challenge, in order.
    pub fn reasons(&self) -> Vec<String> {
        self.reasons.lock().expect("scripted gate poisoned").clone()
    }
}

impl Gate for ScriptedGate {
    fn challenge(&self, reason: &str) -> bool {
        self.reasons
            .lock()
            .expect("scripted gate poisoned")
            .push(reason.to_string());
        self.answers
            .lock()
            .expect("scripted gate poisoned")
            .pop_front()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn enroll_then_verify_accepts_the_phrase() {
        let gate = PromptGate::new(MemoryStore::new());
        gate.enroll("horse battery").unwrap();

        assert!(gate.is_enrolled());
        assert!(gate.verify_phrase("horse battery"));
        assert!(!gate.verify_phrase("horse battery "));
        assert!(!gate.verify_phrase(""));
    }

    #[test]
    fn verify_without_enrollment_is_false() {
        let gate = PromptGate::new(MemoryStore::new());
        assert!(!gate.is_enrolled());
        assert!(!gate.verify_phrase("anything"));
    }

    #[test]
    fn re_enrollment_replaces_the_phrase() {
        let gate = PromptGate::new(MemoryStore::new());
        gate.enroll("first").unwrap();
        gate.enroll("second").unwrap();

        assert!(!gate.verify_phrase("first"));
        assert!(gate.verify_phrase("second"));
    }

    #[test]
    fn clear_enrollment_is_idempotent() {
        let gate = PromptGate::new(MemoryStore::new());
        gate.enroll("phrase").unwrap();

        gate.clear_enrollment().unwrap();
        gate.clear_enrollment().unwrap();
        assert!(!gate.is_enrolled());
    }

    #[test]
    fn unreadable_store_counts_as_not_enrolled() {
        let store = MemoryStore::new();
        let gate = PromptGate::new(store.clone());
        gate.enroll("phrase").unwrap();

        store.fail_loads(true);
        assert!(!gate.is_enrolled());
        assert!(!gate.verify_phrase("phrase"));
    }

    #[test]
    fn scripted_gate_follows_its_script_then_refuses() {
        let gate = ScriptedGate::answering([true, false]);

        assert!(gate.challenge("one"));
        assert!(!gate.challenge("two"));
        assert!(!gate.challenge("three"));
        assert_eq!(gate.calls(), 3);
        assert_eq!(gate.reasons(), ["one", "two", "three"]);
    }
}
