//! `passvault copy` — put a password (or username) on the clipboard.
//!
//! Unless `--keep` is passed, the command stays alive for the configured
//! delay and then clears the clipboard, but only if it still holds the
//! copied value — a later copy from another program is left alone.

use std::thread;
use std::time::Duration;

use crate::cli::output;
use crate::cli::{ensure_unlocked, open_app, resolve_credential, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, title: &str, username: bool, keep: bool) -> Result<()> {
    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();
    let credential = resolve_credential(&snapshot.credentials, title)?;

    let (value, what) = if username {
        (credential.username.as_str(), "Username")
    } else {
        (credential.password.as_str(), "Password")
    };

    let clear_after = (!keep).then(|| app.settings.current().clipboard_clear_secs);
    copy_to_clipboard(value, what, clear_after)
}

/// Copy `value` to the clipboard, optionally clearing it after a delay.
/// `what` names the value in messages ("Password", "Username").
pub fn copy_to_clipboard(value: &str, what: &str, clear_after_secs: Option<u64>) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| PassVaultError::Clipboard(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(value.to_string())
        .map_err(|e| PassVaultError::Clipboard(format!("copy failed: {e}")))?;

    output::success(&format!("{what} copied to clipboard."));

    let Some(secs) = clear_after_secs.filter(|secs| *secs > 0) else {
        return Ok(());
    };

    output::info(&format!("Clearing the clipboard in {secs} seconds (Ctrl-C keeps it)."));
    thread::sleep(Duration::from_secs(secs));

    // Only clear our own value; leave anything copied since then alone.
    let unchanged = clipboard
        .get_text()
        .map(|current| current == value)
        .unwrap_or(false);
    if unchanged {
        clipboard
            .clear()
            .map_err(|e| PassVaultError::Clipboard(format!("clear failed: {e}")))?;
        output::info("Clipboard cleared.");
    }

    Ok(())
}
