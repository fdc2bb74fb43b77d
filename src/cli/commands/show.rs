//! `passvault show` — display one credential in full.

use crate::cli::output;
use crate::cli::{ensure_unlocked, open_app, resolve_credential, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, title: &str, reveal: bool) -> Result<()> {
    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();
    let credential = resolve_credential(&snapshot.credentials, title)?;

    output::print_credential_detail(&credential, &snapshot.categories, reveal);
    if !reveal {
        output::tip("Re-run with --reveal to print the password, or use `passvault copy`.");
    }

    Ok(())
}
