//! `passvault rm` — delete credentials by title or by list position.
//!
//! Titles resolve through the usual case-insensitive lookup; positions
//! are the 1-based `#` numbers `list` prints. The two modes are mutually
//! exclusive on the command line, and the whole batch persists once.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{ensure_unlocked, open_app, resolve_credential, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `rm` command.
pub fn execute(cli: &Cli, titles: &[String], at: &[usize], force: bool) -> Result<()> {
    if titles.is_empty() && at.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "nothing to remove — pass titles or --at positions".into(),
        ));
    }

    let app = open_app(cli)?;
    ensure_unlocked(&app)?;
    let snapshot = app.repository.snapshot();

    let mut ids = Vec::new();
    for title in titles {
        ids.push(resolve_credential(&snapshot.credentials, title)?.id);
    }

    let mut positions = Vec::new();
    for &shown in at {
        if shown == 0 || shown > snapshot.credentials.len() {
            return Err(PassVaultError::CredentialNotFound(format!("#{shown}")));
        }
        positions.push(shown - 1);
    }

    if !force {
        let count = ids.len() + positions.len();
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {count} credential(s)?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Nothing deleted.");
            return Ok(());
        }
    }

    let removed = if ids.is_empty() {
        app.repository.delete_at(&positions)?
    } else {
        app.repository.delete_credentials(&ids)?
    };

    output::success(&format!("Deleted {removed} credential(s)."));
    Ok(())
}
