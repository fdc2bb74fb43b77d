//! `passvault completions` — emit a completion script for one shell.
//!
//! The script goes to stdout so it can be dropped wherever the shell
//! loads completions from:
//!
//!   passvault completions zsh > "${fpath[1]}/_passvault"
//!   passvault completions bash > ~/.bash_completion.d/passvault

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{PassVaultError, Result};

/// Shell names accepted on the command line and the generator each maps
/// to. `ps` is a convenience alias.
const SHELLS: &[(&str, Shell)] = &[
    ("bash", Shell::Bash),
    ("zsh", Shell::Zsh),
    ("fish", Shell::Fish),
    ("powershell", Shell::PowerShell),
    ("ps", Shell::PowerShell),
    ("elvish", Shell::Elvish),
];

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = shell_for(shell)?;
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "passvault", &mut io::stdout());
    Ok(())
}

fn shell_for(name: &str) -> Result<Shell> {
    let wanted = name.to_lowercase();
    SHELLS
        .iter()
        .find(|(known, _)| *known == wanted)
        .map(|&(_, shell)| shell)
        .ok_or_else(|| {
            PassVaultError::CommandFailed(format!(
                "unknown shell '{name}' — supported: bash, zsh, fish, powershell, elvish"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_shell_resolves() {
        for &(name, expected) in SHELLS {
            assert_eq!(shell_for(name).unwrap(), expected);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(shell_for("Zsh").unwrap(), Shell::Zsh);
        assert_eq!(shell_for("POWERSHELL").unwrap(), Shell::PowerShell);
    }

    #[test]
    fn the_error_names_the_offending_shell() {
        let err = shell_for("csh").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown shell"));
        assert!(message.contains("csh"));
    }

    #[test]
    fn an_empty_name_fails() {
        assert!(shell_for("").is_err());
    }
}
