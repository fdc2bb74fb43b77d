//! `passvault edit` — re-prompt a credential's fields with the current
//! values filled in.

use crate::cli::output;
use crate::cli::{
    ensure_unlocked, open_app, pick_category, prompt_optional, prompt_required,
    resolve_credential, Cli,
};
use crate::errors::{PassVaultError, Result};
use crate::vault::Credential;

/// Execute the `edit` command.
pub fn execute(cli: &Cli, title: &str) -> Result<()> {
    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();
    let current = resolve_credential(&snapshot.credentials, title)?;

    let new_title = prompt_required("Title", &current.title)?;
    let username = prompt_required("Username", &current.username)?;

    let entered = dialoguer::Password::new()
        .with_prompt("Password (empty keeps the current one)")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    let password = if entered.is_empty() {
        current.password.clone()
    } else {
        entered
    };

    let notes = prompt_optional("Notes", current.notes.as_deref().unwrap_or(""))?;
    let category_id = pick_category(&snapshot.categories, current.category_id)?;

    let applied = app.repository.update_credential(Credential {
        id: current.id,
        title: new_title.clone(),
        username,
        password,
        notes,
        category_id,
        created_at: current.created_at,
        updated_at: current.updated_at,
    })?;

    if applied {
        output::success(&format!("Updated '{new_title}'."));
    } else {
        output::warning("That credential no longer exists; nothing changed.");
    }

    Ok(())
}
