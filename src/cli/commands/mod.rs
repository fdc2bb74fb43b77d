//! Implementations of all CLI subcommands.

pub mod add;
pub mod auth;
pub mod category;
pub mod completions;
pub mod copy;
pub mod edit;
pub mod generate;
pub mod interactive;
pub mod list;
pub mod remove;
pub mod settings_cmd;
pub mod show;
