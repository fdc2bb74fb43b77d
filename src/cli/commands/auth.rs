//! `passvault auth` — manage the unlock phrase behind the session gate.
//!
//! Replacing or removing an enrolled phrase first requires passing a
//! challenge with the current one.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::errors::{PassVaultError, Result};
use crate::session::{Gate, PromptGate};
use crate::store::KeyringStore;

/// Minimum phrase length to prevent trivially weak phrases.
const MIN_PHRASE_LEN: usize = 8;

/// Execute `auth enroll`.
pub fn execute_enroll() -> Result<()> {
    let gate = PromptGate::new(KeyringStore::new());

    if gate.is_enrolled() {
        output::info("An unlock phrase is already enrolled.");
        if !gate.challenge("Current unlock phrase") {
            return Err(PassVaultError::UnlockRefused);
        }
    }

    let phrase = prompt_new_phrase()?;
    gate.enroll(&phrase)?;

    output::success("Unlock phrase enrolled.");
    output::tip("The gate is consulted while `settings` has require_gate_on_launch = true.");
    Ok(())
}

/// Execute `auth remove`.
pub fn execute_remove() -> Result<()> {
    let gate = PromptGate::new(KeyringStore::new());

    if !gate.is_enrolled() {
        output::info("No unlock phrase is enrolled.");
        return Ok(());
    }

    if !gate.challenge("Current unlock phrase") {
        return Err(PassVaultError::UnlockRefused);
    }

    gate.clear_enrollment()?;
    output::success("Unlock phrase removed.");
    output::warning("While the gate is required, unlock requests will now be refused.");
    output::tip(
        "Enroll a new phrase with `passvault auth enroll`, or run \
         `passvault settings --require-gate false`.",
    );
    Ok(())
}

/// Prompt for a new phrase with confirmation, enforcing a minimum length.
fn prompt_new_phrase() -> Result<Zeroizing<String>> {
    loop {
        let phrase = dialoguer::Password::new()
            .with_prompt("Choose an unlock phrase")
            .with_confirmation("Confirm the unlock phrase", "Phrases do not match, try again")
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("phrase prompt: {e}")))?;

        if phrase.len() < MIN_PHRASE_LEN {
            output::warning(&format!(
                "Phrase must be at least {MIN_PHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(phrase));
    }
}
