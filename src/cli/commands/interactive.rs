//! `passvault` with no subcommand — an interactive session shell.
//!
//! The shell mirrors the lifecycle the session guard was built for: it
//! starts locked and attempts one unlock up front; "Lock" feeds the
//! guard a backgrounding signal, so with the gate disabled the vault
//! deliberately stays open. Vault content renders only while unlocked.

use dialoguer::Select;

use crate::cli::output;
use crate::cli::{open_app, prompt_new_credential, App, Cli};
use crate::errors::{PassVaultError, Result};
use crate::session::{PromptGate, UnlockOutcome};
use crate::store::KeyringStore;
use crate::vault::{Credential, VaultPayload};

use super::copy::copy_to_clipboard;

/// Run the interactive session shell.
pub fn execute(cli: &Cli) -> Result<()> {
    let app = open_app(cli)?;

    output::info("PassVault session shell. The vault starts locked.");
    try_unlock(&app);

    loop {
        if app.guard.is_locked() {
            match menu(&["Unlock", "Quit"])? {
                0 => try_unlock(&app),
                _ => break,
            }
        } else {
            match menu(&[
                "List credentials",
                "Show a credential",
                "Copy a password",
                "Add a credential",
                "Lock",
                "Quit",
            ])? {
                0 => list(&app),
                1 => show(&app)?,
                2 => copy(&app)?,
                3 => add(&app)?,
                4 => lock(&app),
                _ => break,
            }
        }
    }

    Ok(())
}

fn menu(items: &[&str]) -> Result<usize> {
    Select::new()
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("menu: {e}")))
}

fn try_unlock(app: &App) {
    if app.settings.current().require_gate_on_launch
        && !PromptGate::new(KeyringStore::new()).is_enrolled()
    {
        output::warning(&PassVaultError::GateNotEnrolled.to_string());
        return;
    }

    match app.guard.request_unlock() {
        UnlockOutcome::Unlocked => output::success("Vault unlocked."),
        UnlockOutcome::Refused => output::error("Failed to unlock. Please try again."),
        UnlockOutcome::AlreadyPending => {}
    }
}

fn lock(app: &App) {
    app.guard.notify_backgrounded();
    if app.guard.is_locked() {
        output::info("Vault locked.");
    } else {
        output::info("The gate is disabled; the vault stays open.");
    }
}

fn list(app: &App) {
    let snapshot = app.repository.snapshot();
    let rows: Vec<(usize, &Credential)> = snapshot.credentials.iter().enumerate().collect();
    output::print_credentials_table(&rows, &snapshot.categories);
}

fn show(app: &App) -> Result<()> {
    let snapshot = app.repository.snapshot();
    if let Some(credential) = pick(&snapshot)? {
        output::print_credential_detail(&credential, &snapshot.categories, false);
    }
    Ok(())
}

fn copy(app: &App) -> Result<()> {
    let snapshot = app.repository.snapshot();
    if let Some(credential) = pick(&snapshot)? {
        // No timed clear here: it would stall the menu. The one-shot
        // `passvault copy` does the timed variant.
        copy_to_clipboard(&credential.password, "Password", None)?;
    }
    Ok(())
}

fn add(app: &App) -> Result<()> {
    let snapshot = app.repository.snapshot();
    let new = prompt_new_credential(&snapshot.categories, false)?;

    match app.repository.add_credential(new) {
        Ok(credential) => output::success(&format!("Stored '{}'.", credential.title)),
        // The entry stays in the session vault even though the store
        // write failed.
        Err(e) => output::warning(&format!("Kept for this session but not saved: {e}")),
    }
    Ok(())
}

fn pick(snapshot: &VaultPayload) -> Result<Option<Credential>> {
    if snapshot.credentials.is_empty() {
        output::info("No credentials in the vault yet.");
        return Ok(None);
    }

    let items: Vec<String> = snapshot
        .credentials
        .iter()
        .map(|c| format!("{} ({})", c.title, c.username))
        .collect();
    let index = Select::new()
        .with_prompt("Credential")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("credential picker: {e}")))?;

    Ok(Some(snapshot.credentials[index].clone()))
}
