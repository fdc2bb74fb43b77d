//! `passvault add` — store a new credential.

use crate::cli::output;
use crate::cli::{ensure_unlocked, open_app, prompt_new_credential, Cli};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, generate: bool) -> Result<()> {
    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();
    let new = prompt_new_credential(&snapshot.categories, generate)?;
    let credential = app.repository.add_credential(new)?;

    output::success(&format!("Stored '{}'.", credential.title));
    Ok(())
}
