//! `passvault list` — display credentials in a table.
//!
//! Filters stack: a category filter (or `--uncategorized`) first, then a
//! case-insensitive substring query on title and username. Row numbers
//! always refer to the unfiltered vault order, so they stay usable with
//! `rm --at`.

use crate::cli::output;
use crate::cli::{ensure_unlocked, open_app, resolve_category, Cli};
use crate::errors::Result;
use crate::vault::Credential;

/// Execute the `list` command.
pub fn execute(
    cli: &Cli,
    category: Option<&str>,
    uncategorized: bool,
    query: Option<&str>,
) -> Result<()> {
    let app = open_app(cli)?;
    ensure_unlocked(&app)?;

    let snapshot = app.repository.snapshot();

    let category_filter = match category {
        Some(name) => Some(resolve_category(&snapshot.categories, name)?.id),
        None => None,
    };
    let needle = query.map(str::to_lowercase);

    let rows: Vec<(usize, &Credential)> = snapshot
        .credentials
        .iter()
        .enumerate()
        .filter(|(_, c)| match category_filter {
            Some(id) => c.category_id == Some(id),
            None => !uncategorized || c.category_id.is_none(),
        })
        .filter(|(_, c)| match &needle {
            Some(needle) => {
                c.title.to_lowercase().contains(needle)
                    || c.username.to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect();

    output::info(&format!(
        "{} of {} credential(s)",
        rows.len(),
        snapshot.credentials.len()
    ));
    output::print_credentials_table(&rows, &snapshot.categories);

    Ok(())
}
