//! Session module — the lock state machine and its authentication gate.
//!
//! This module provides:
//! - The `Gate` trait plus `PromptGate` (terminal adapter) and
//!   `ScriptedGate` (test adapter) (`gate`)
//! - `SessionGuard`, the Locked/Unlocked state machine and sole gate
//!   caller (`guard`)

pub mod gate;
pub mod guard;

// Re-export the most commonly used items.
pub use gate::{Gate, PromptGate, ScriptedGate, GATE_ACCOUNT};
pub use guard::{SessionGuard, SessionState, UnlockOutcome, UnlockPolicy, UNLOCK_REASON};
