//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::config::{Settings, SettingsStore};
use crate::errors::{PassVaultError, Result};
use crate::session::{PromptGate, SessionGuard, UnlockOutcome};
use crate::store::KeyringStore;
use crate::vault::{Category, Credential, LoadOutcome, NewCredential, VaultRepository};

/// PassVault CLI: personal credential vault behind the OS secure store.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Personal credential vault locked behind the OS secure store",
    version
)]
pub struct Cli {
    /// Run without a subcommand for the interactive session shell.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (default: the platform user config dir)
    #[arg(long, global = true, env = "PASSVAULT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a credential
    Add {
        /// Generate the password instead of prompting for one
        #[arg(short, long)]
        generate: bool,
    },

    /// List credentials
    List {
        /// Only credentials in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only credentials with no category
        #[arg(long, conflicts_with = "category")]
        uncategorized: bool,

        /// Case-insensitive match on title or username
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one credential
    Show {
        /// Credential title
        title: String,

        /// Print the password instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Copy a credential's password to the clipboard
    Copy {
        /// Credential title
        title: String,

        /// Copy the username instead of the password
        #[arg(short, long)]
        username: bool,

        /// Skip the timed clipboard clear
        #[arg(long)]
        keep: bool,
    },

    /// Edit a credential
    Edit {
        /// Credential title
        title: String,
    },

    /// Remove credentials
    Rm {
        /// Credential titles
        titles: Vec<String>,

        /// 1-based list positions instead of titles (e.g. --at 1,3)
        #[arg(long, value_delimiter = ',', conflicts_with = "titles")]
        at: Vec<usize>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Show or change settings
    Settings {
        /// Print the current settings
        #[arg(long)]
        show: bool,

        /// Whether the unlock gate guards the vault (true/false)
        #[arg(long)]
        require_gate: Option<bool>,

        /// Seconds before a copied secret is cleared from the clipboard
        #[arg(long)]
        clipboard_clear: Option<u64>,
    },

    /// Manage the unlock phrase
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Generate a random password
    Generate {
        /// Password length
        #[arg(short, long, default_value = "20")]
        length: usize,

        /// Letters and digits only
        #[arg(long)]
        no_symbols: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Category subcommands.
#[derive(clap::Subcommand)]
pub enum CategoryAction {
    /// List categories with member counts
    List,

    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Rename a category or change its description
    Edit {
        /// Current category name
        name: String,

        /// New name
        #[arg(long)]
        rename: Option<String>,

        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a category (member credentials become uncategorized)
    Rm {
        /// Category name
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Auth subcommands for unlock phrase management.
#[derive(clap::Subcommand)]
pub enum AuthAction {
    /// Enroll or replace the unlock phrase
    Enroll,

    /// Remove the unlock phrase
    Remove,
}

// ---------------------------------------------------------------------------
// Shared wiring and helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a data command needs: the repository, the session guard,
/// and the settings store the guard reads its policy from.
pub struct App {
    pub repository: VaultRepository<KeyringStore>,
    pub guard: SessionGuard<PromptGate<KeyringStore>, Arc<SettingsStore>>,
    pub settings: Arc<SettingsStore>,
}

/// Resolve the config directory from the CLI flag or the platform default.
pub fn config_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => Settings::default_dir(),
    }
}

/// Wire up the production stack: keyring-backed vault and gate, settings
/// shared between the frontend and the session guard.
///
/// Surfaces the interesting load outcomes (unreadable blob, unreachable
/// store, legacy migration) once, before any command output.
pub fn open_app(cli: &Cli) -> Result<App> {
    let settings = Arc::new(SettingsStore::open(config_dir(cli)?)?);
    let repository = VaultRepository::new(KeyringStore::new());
    let guard = SessionGuard::new(
        PromptGate::new(KeyringStore::new()),
        Arc::clone(&settings),
    );

    report_load(repository.load_outcome());

    Ok(App {
        repository,
        guard,
        settings,
    })
}

fn report_load(outcome: LoadOutcome) {
    match outcome {
        LoadOutcome::RecoveredUnreadable => {
            output::warning("Stored vault data was unreadable; starting from an empty vault.");
            output::tip(
                "The unreadable data stays in the secure store until your next successful change.",
            );
        }
        LoadOutcome::StoreUnavailable => {
            output::warning("The secure store could not be read; changes may not persist.");
        }
        LoadOutcome::Migrated => {
            output::info("Vault data from an older version loaded; it upgrades on your next change.");
        }
        LoadOutcome::Fresh | LoadOutcome::Loaded => {}
    }
}

/// Run the unlock flow a data command needs before touching the vault.
///
/// With the gate policy off this unlocks silently. A required gate with
/// no enrolled phrase is reported up front instead of running a challenge
/// that cannot succeed.
pub fn ensure_unlocked(app: &App) -> Result<()> {
    if app.guard.is_locked()
        && app.settings.current().require_gate_on_launch
        && !PromptGate::new(KeyringStore::new()).is_enrolled()
    {
        return Err(PassVaultError::GateNotEnrolled);
    }

    match app.guard.request_unlock() {
        UnlockOutcome::Unlocked => Ok(()),
        UnlockOutcome::Refused | UnlockOutcome::AlreadyPending => {
            Err(PassVaultError::UnlockRefused)
        }
    }
}

/// Resolve a title to a single credential, case-insensitively.
///
/// Zero matches is a not-found error; several matches ask the caller to
/// disambiguate by position instead.
pub fn resolve_credential(credentials: &[Credential], title: &str) -> Result<Credential> {
    let needle = title.trim().to_lowercase();
    let mut matches = credentials
        .iter()
        .filter(|c| c.title.to_lowercase() == needle);

    let Some(first) = matches.next() else {
        return Err(PassVaultError::CredentialNotFound(title.to_string()));
    };
    if matches.next().is_some() {
        return Err(PassVaultError::AmbiguousTitle(title.to_string()));
    }
    Ok(first.clone())
}

/// Resolve a category name, case-insensitively. Name uniqueness is not
/// enforced at the data level; the first match wins.
pub fn resolve_category(categories: &[Category], name: &str) -> Result<Category> {
    let needle = name.trim().to_lowercase();
    categories
        .iter()
        .find(|c| c.name.to_lowercase() == needle)
        .cloned()
        .ok_or_else(|| PassVaultError::CategoryNotFound(name.to_string()))
}

/// Prompt for a required text field, trimming whitespace and re-asking
/// while the answer is empty. `initial` pre-fills the line for edits.
pub fn prompt_required(label: &str, initial: &str) -> Result<String> {
    loop {
        let value: String = dialoguer::Input::new()
            .with_prompt(label)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;

        let trimmed = value.trim();
        if trimmed.is_empty() {
            output::warning(&format!("{label} cannot be empty. Try again."));
            continue;
        }
        return Ok(trimmed.to_string());
    }
}

/// Prompt for an optional text field; an empty answer means "none".
pub fn prompt_optional(label: &str, initial: &str) -> Result<Option<String>> {
    let value: String = dialoguer::Input::new()
        .with_prompt(format!("{label} (optional)"))
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;

    let trimmed = value.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Pick a category (or none) from a select list, defaulting to `current`.
pub fn pick_category(categories: &[Category], current: Option<uuid::Uuid>) -> Result<Option<uuid::Uuid>> {
    let mut items = vec!["(none)".to_string()];
    items.extend(categories.iter().map(|c| c.name.clone()));

    let default = current
        .and_then(|id| categories.iter().position(|c| c.id == id))
        .map(|index| index + 1)
        .unwrap_or(0);

    let chosen = dialoguer::Select::new()
        .with_prompt("Category")
        .items(&items)
        .default(default)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("category picker: {e}")))?;

    Ok(if chosen == 0 {
        None
    } else {
        Some(categories[chosen - 1].id)
    })
}

/// Prompt the full credential form, shared by `add` and the session
/// shell. With `generate` the password comes from the generator instead
/// of a prompt.
pub fn prompt_new_credential(categories: &[Category], generate: bool) -> Result<NewCredential> {
    let title = prompt_required("Title", "")?;
    let username = prompt_required("Username", "")?;

    let password = if generate {
        let password = commands::generate::random_password(commands::generate::DEFAULT_LENGTH, true);
        output::info("Generated a random password.");
        password
    } else {
        dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?
    };

    let notes = prompt_optional("Notes", "")?;
    let category_id = pick_category(categories, None)?;

    Ok(NewCredential {
        title,
        username,
        password,
        notes,
        category_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn credential(title: &str) -> Credential {
        Credential {
            id: Uuid::new_v4(),
            title: title.to_string(),
            username: "user".to_string(),
            password: "pw".to_string(),
            notes: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn category(name: &str) -> Category {
        Category::new(name, None, false)
    }

    #[test]
    fn resolve_credential_matches_case_insensitively() {
        let credentials = vec![credential("Gmail"), credential("Bank")];
        let found = resolve_credential(&credentials, "gmail").unwrap();
        assert_eq!(found.title, "Gmail");
    }

    #[test]
    fn resolve_credential_trims_the_query() {
        let credentials = vec![credential("Gmail")];
        assert!(resolve_credential(&credentials, "  Gmail ").is_ok());
    }

    #[test]
    fn resolve_credential_unknown_title_fails() {
        let credentials = vec![credential("Gmail")];
        let err = resolve_credential(&credentials, "Github").unwrap_err();
        assert!(matches!(err, PassVaultError::CredentialNotFound(_)));
    }

    #[test]
    fn resolve_credential_duplicate_titles_are_ambiguous() {
        let credentials = vec![credential("Gmail"), credential("gmail")];
        let err = resolve_credential(&credentials, "Gmail").unwrap_err();
        assert!(matches!(err, PassVaultError::AmbiguousTitle(_)));
    }

    #[test]
    fn resolve_category_first_match_wins() {
        let categories = vec![category("Work"), category("work")];
        let found = resolve_category(&categories, "WORK").unwrap();
        assert_eq!(found.id, categories[0].id);
    }

    #[test]
    fn resolve_category_unknown_name_fails() {
        let categories = vec![category("Work")];
        let err = resolve_category(&categories, "Travel").unwrap_err();
        assert!(matches!(err, PassVaultError::CategoryNotFound(_)));
    }
}
