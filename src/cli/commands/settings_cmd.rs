//! `passvault settings` — read or change the persisted settings.
//!
//! Settings never require an unlock: the gate policy itself must stay
//! reachable when the vault is locked out.

use crate::cli::output;
use crate::cli::{config_dir, Cli};
use crate::config::{Settings, SettingsStore};
use crate::errors::Result;

/// Execute the `settings` command.
pub fn execute(
    cli: &Cli,
    show: bool,
    require_gate: Option<bool>,
    clipboard_clear: Option<u64>,
) -> Result<()> {
    let store = SettingsStore::open(config_dir(cli)?)?;
    let changed = require_gate.is_some() || clipboard_clear.is_some();

    if changed {
        let updated = store.update(|s| {
            if let Some(value) = require_gate {
                s.require_gate_on_launch = value;
            }
            if let Some(value) = clipboard_clear {
                s.clipboard_clear_secs = value;
            }
        })?;

        output::success("Settings saved.");
        if require_gate == Some(false) {
            output::warning(
                "The vault now opens without a challenge and stays open across sessions.",
            );
        }
        if show {
            print_settings(&updated);
        }
        return Ok(());
    }

    print_settings(&store.current());
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("require_gate_on_launch = {}", settings.require_gate_on_launch);
    println!("clipboard_clear_secs = {}", settings.clipboard_clear_secs);
}
