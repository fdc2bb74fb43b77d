//! Config module — user-level settings, persisted as TOML.

pub mod settings;

pub use settings::{Settings, SettingsStore};
