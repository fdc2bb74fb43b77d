//! The session lock state machine.
//!
//! `SessionGuard` owns the process-lifetime `Locked`/`Unlocked` state and
//! is the only caller of the gate. The policy flag is read through
//! [`UnlockPolicy`] at the moment of each event, never cached, so a
//! settings change applies to the very next unlock request or
//! backgrounding signal.
//!
//! Transitions:
//!
//! - an unlock request while `Unlocked` is a no-op;
//! - with the policy off, an unlock request succeeds immediately and the
//!   gate is not consulted; backgrounding leaves the session open;
//! - with the policy on, an unlock request runs one gate challenge and
//!   backgrounding re-arms the lock;
//! - a refused challenge leaves the state `Locked`; retry happens only on
//!   a fresh request, never automatically.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::gate::Gate;

/// Reason string shown by the gate for session unlocks.
pub const UNLOCK_REASON: &str = "Unlock your vault";

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// Whether vault content may currently be exposed. Process-lifetime only,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Locked,
    Unlocked,
}

/// Result of one unlock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The session is unlocked — this request unlocked it, the policy
    /// waived the gate, or it already was unlocked.
    Unlocked,
    /// The gate refused; the session stays locked until a fresh request.
    Refused,
    /// A previous request is still waiting on the gate. No second prompt
    /// was raised.
    AlreadyPending,
}

/// Source of the `require_gate_on_launch` flag (the settings store in
/// production). Consulted per event.
pub trait UnlockPolicy {
    fn require_gate_on_launch(&self) -> bool;
}

// Lets one shared settings store serve both the guard and the frontend.
impl<P: UnlockPolicy + ?Sized> UnlockPolicy for Arc<P> {
    fn require_gate_on_launch(&self) -> bool {
        (**self).require_gate_on_launch()
    }
}

// ---------------------------------------------------------------------------
// SessionGuard
// ---------------------------------------------------------------------------

type StateObserver = Arc<dyn Fn(SessionState) + Send + Sync>;

/// The lock state machine. Starts `Locked`; all transitions run through
/// [`request_unlock`](Self::request_unlock) and
/// [`notify_backgrounded`](Self::notify_backgrounded).
pub struct SessionGuard<G, P> {
    gate: G,
    policy: P,
    state: Mutex<SessionState>,
    authenticating: AtomicBool,
    observers: Mutex<Vec<StateObserver>>,
}

impl<G: Gate, P: UnlockPolicy> SessionGuard<G, P> {
    pub fn new(gate: G, policy: P) -> Self {
        Self {
            gate,
            policy,
            state: Mutex::new(SessionState::Locked),
            authenticating: AtomicBool::new(false),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn is_locked(&self) -> bool {
        *self.lock_state() == SessionState::Locked
    }

    /// True exactly while a gate challenge is in flight.
    pub fn is_authenticating(&self) -> bool {
        self.authenticating.load(Ordering::SeqCst)
    }

    /// Register an observer invoked with the new state on every actual
    /// transition (not on no-ops).
    pub fn subscribe(&self, observer: impl Fn(SessionState) + Send + Sync + 'static) {
        self.lock_observers().push(Arc::new(observer));
    }

    /// Handle a user's unlock request.
    ///
    /// The gate challenge runs without holding the state lock, since it
    /// can block for as long as the user takes; the `authenticating` flag
    /// both feeds [`is_authenticating`](Self::is_authenticating) and
    /// rejects a second request while the first is pending.
    pub fn request_unlock(&self) -> UnlockOutcome {
        if !self.is_locked() {
            return UnlockOutcome::Unlocked;
        }

        if !self.policy.require_gate_on_launch() {
            // The user opted out of the gate; the vault opens directly.
            self.transition(SessionState::Unlocked);
            return UnlockOutcome::Unlocked;
        }

        if self.authenticating.swap(true, Ordering::SeqCst) {
            return UnlockOutcome::AlreadyPending;
        }
        let verified = self.gate.challenge(UNLOCK_REASON);
        self.authenticating.store(false, Ordering::SeqCst);

        if verified {
            self.transition(SessionState::Unlocked);
            UnlockOutcome::Unlocked
        } else {
            UnlockOutcome::Refused
        }
    }

    /// Handle the host environment reporting a loss of foreground focus.
    /// Re-arms the lock only if the policy requires the gate at this
    /// moment; with the gate disabled the session deliberately stays
    /// open.
    pub fn notify_backgrounded(&self) {
        if self.policy.require_gate_on_launch() {
            self.transition(SessionState::Locked);
        }
    }

    fn transition(&self, next: SessionState) {
        {
            let mut state = self.lock_state();
            if *state == next {
                return;
            }
            *state = next;
        }
        // Callbacks run with no guard lock held, so one may drive the
        // next transition or subscribe in turn.
        let observers: Vec<StateObserver> = self.lock_observers().clone();
        for observer in &observers {
            observer(next);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<StateObserver>> {
        self.observers.lock().unwrap_or_else(|e| e.into_inner())
    }
}
