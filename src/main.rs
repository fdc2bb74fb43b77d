use clap::Parser;
use passvault::cli::{AuthAction, CategoryAction, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => passvault::cli::commands::interactive::execute(&cli),
        Some(Commands::Add { generate }) => passvault::cli::commands::add::execute(&cli, generate),
        Some(Commands::List {
            ref category,
            uncategorized,
            ref query,
        }) => passvault::cli::commands::list::execute(
            &cli,
            category.as_deref(),
            uncategorized,
            query.as_deref(),
        ),
        Some(Commands::Show { ref title, reveal }) => {
            passvault::cli::commands::show::execute(&cli, title, reveal)
        }
        Some(Commands::Copy {
            ref title,
            username,
            keep,
        }) => passvault::cli::commands::copy::execute(&cli, title, username, keep),
        Some(Commands::Edit { ref title }) => passvault::cli::commands::edit::execute(&cli, title),
        Some(Commands::Rm {
            ref titles,
            ref at,
            force,
        }) => passvault::cli::commands::remove::execute(&cli, titles, at, force),
        Some(Commands::Category { ref action }) => match action {
            CategoryAction::List => passvault::cli::commands::category::execute_list(&cli),
            CategoryAction::Add {
                ref name,
                ref description,
            } => passvault::cli::commands::category::execute_add(&cli, name, description.clone()),
            CategoryAction::Edit {
                ref name,
                ref rename,
                ref description,
            } => passvault::cli::commands::category::execute_edit(
                &cli,
                name,
                rename.as_deref(),
                description.clone(),
            ),
            CategoryAction::Rm { ref name, force } => {
                passvault::cli::commands::category::execute_rm(&cli, name, *force)
            }
        },
        Some(Commands::Settings {
            show,
            require_gate,
            clipboard_clear,
        }) => passvault::cli::commands::settings_cmd::execute(&cli, show, require_gate, clipboard_clear),
        Some(Commands::Auth { ref action }) => match action {
            AuthAction::Enroll => passvault::cli::commands::auth::execute_enroll(),
            AuthAction::Remove => passvault::cli::commands::auth::execute_remove(),
        },
        Some(Commands::Generate { length, no_symbols }) => {
            passvault::cli::commands::generate::execute(length, no_symbols)
        }
        Some(Commands::Completions { ref shell }) => {
            passvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
