pub mod cli;
pub mod config;
pub mod errors;
pub mod session;
pub mod store;
pub mod vault;
