//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::collections::HashMap;

use comfy_table::{ContentArrangement, Table};
use console::style;
use uuid::Uuid;

use crate::vault::{Category, Credential};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials (#, Title, Username, Category, Updated).
///
/// Rows carry their 0-based position in the unfiltered vault order, so
/// the printed numbers stay valid for `rm --at` even when the caller
/// filtered the list.
pub fn print_credentials_table(rows: &[(usize, &Credential)], categories: &[Category]) {
    if rows.is_empty() {
        info("No credentials to show.");
        tip("Run `passvault add` to store your first credential.");
        return;
    }

    let names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Title", "Username", "Category", "Updated"]);

    for (position, c) in rows {
        let category = c
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or("");
        table.add_row(vec![
            (position + 1).to_string(),
            c.title.clone(),
            c.username.clone(),
            category.to_string(),
            c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of categories (Name, Description, Credentials, System).
pub fn print_categories_table(categories: &[Category], credentials: &[Credential]) {
    if categories.is_empty() {
        info("No categories defined.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Description", "Credentials", "System"]);

    for category in categories {
        let members = credentials
            .iter()
            .filter(|c| c.category_id == Some(category.id))
            .count();
        table.add_row(vec![
            category.name.clone(),
            category.description.clone().unwrap_or_default(),
            members.to_string(),
            if category.is_system { "yes" } else { "" }.to_string(),
        ]);
    }

    println!("{table}");
}

/// Print one credential in full. The password stays masked unless
/// `reveal` is set.
pub fn print_credential_detail(credential: &Credential, categories: &[Category], reveal: bool) {
    println!("{}", style(&credential.title).bold());
    println!("  Username: {}", credential.username);
    if reveal {
        println!("  Password: {}", credential.password);
    } else {
        println!("  Password: ••••••••");
    }
    if let Some(name) = credential
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| &c.name)
    {
        println!("  Category: {name}");
    }
    if let Some(notes) = &credential.notes {
        println!("  Notes:    {notes}");
    }
    println!(
        "  Created:  {}",
        credential.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Updated:  {}",
        credential.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
}
