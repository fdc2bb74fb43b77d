//! `passvault category` — manage categories.
//!
//! Removing a category detaches its member credentials (they become
//! uncategorized); the command spells that out before confirming.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{ensure_unlocked, open_app, resolve_category, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute `category list`.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();
    output::print_categories_table(&snapshot.categories, &snapshot.credentials);
    Ok(())
}

/// Execute `category add`.
pub fn execute_add(cli: &Cli, name: &str, description: Option<String>) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "category name cannot be empty".into(),
        ));
    }

    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let category = app.repository.add_category(name, normalize(description))?;
    output::success(&format!("Added category '{}'.", category.name));
    Ok(())
}

/// Execute `category edit`.
pub fn execute_edit(
    cli: &Cli,
    name: &str,
    rename: Option<&str>,
    description: Option<String>,
) -> Result<()> {
    if rename.is_none() && description.is_none() {
        return Err(PassVaultError::CommandFailed(
            "nothing to change — pass --rename and/or --description".into(),
        ));
    }

    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();
    let mut category = resolve_category(&snapshot.categories, name)?;

    if let Some(new_name) = rename {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(PassVaultError::CommandFailed(
                "category name cannot be empty".into(),
            ));
        }
        category.name = new_name.to_string();
    }
    if description.is_some() {
        // An explicit empty string clears the description.
        category.description = normalize(description);
    }

    let applied = app.repository.update_category(category)?;
    if applied {
        output::success("Category updated.");
    } else {
        output::warning("That category no longer exists; nothing changed.");
    }
    Ok(())
}

/// Execute `category rm`.
pub fn execute_rm(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();
    let category = resolve_category(&snapshot.categories, name)?;
    let members = snapshot
        .credentials
        .iter()
        .filter(|c| c.category_id == Some(category.id))
        .count();

    if !force {
        if members > 0 {
            output::warning(&format!(
                "{members} credential(s) will become uncategorized."
            ));
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete category '{}'?", category.name))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Nothing deleted.");
            return Ok(());
        }
    }

    if app.repository.delete_category(category.id)? {
        output::success(&format!("Deleted category '{}'.", category.name));
    } else {
        output::info("Category was already gone.");
    }
    Ok(())
}

fn normalize(description: Option<String>) -> Option<String> {
    description.and_then(|d| {
        let trimmed = d.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
