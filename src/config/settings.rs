use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};
use crate::session::UnlockPolicy;

/// User-level configuration, loaded from `passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all. Settings live beside neither the vault
/// blob nor the gate digest: they are plain TOML in the user config
/// directory, persisted independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether the session gate guards the vault. When false the vault
    /// opens without a challenge and stays open across backgrounding.
    #[serde(default = "default_require_gate_on_launch")]
    pub require_gate_on_launch: bool,

    /// Seconds before a copied secret is cleared from the clipboard.
    #[serde(default = "default_clipboard_clear_secs")]
    pub clipboard_clear_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_require_gate_on_launch() -> bool {
    true
}

fn default_clipboard_clear_secs() -> u64 {
    60
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            require_gate_on_launch: default_require_gate_on_launch(),
            clipboard_clear_secs: default_clipboard_clear_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "passvault.toml";

    /// The default config directory: `<user config dir>/passvault`.
    pub fn default_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            PassVaultError::ConfigError("no user config directory on this platform".to_string())
        })?;
        Ok(base.join("passvault"))
    }

    /// Load settings from `<dir>/passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Write settings to `<dir>/passvault.toml`, creating the directory
    /// if needed.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| PassVaultError::ConfigError(format!("Failed to encode settings: {e}")))?;
        std::fs::write(dir.join(Self::FILE_NAME), contents)?;

        Ok(())
    }
}

// ── SettingsStore ────────────────────────────────────────────────────

/// Shared, interior-mutable settings handle.
///
/// Wraps the loaded [`Settings`] so one instance can serve both the
/// frontend (read/write) and the session guard, which reads the gate
/// policy through [`UnlockPolicy`] at the moment of each event.
pub struct SettingsStore {
    dir: PathBuf,
    current: Mutex<Settings>,
}

impl SettingsStore {
    /// Load settings from `dir` and keep the handle bound to it.
    pub fn open(dir: PathBuf) -> Result<Self> {
        let settings = Settings::load(&dir)?;
        Ok(Self {
            dir,
            current: Mutex::new(settings),
        })
    }

    /// A copy of the current settings.
    pub fn current(&self) -> Settings {
        self.lock().clone()
    }

    /// Apply `change` and persist the result. The in-memory value is
    /// updated even if the write fails, mirroring how vault mutations
    /// survive a failed persist.
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut current = self.lock();
        change(&mut current);
        let updated = current.clone();
        drop(current);

        updated.save(&self.dir)?;
        Ok(updated)
    }

    fn lock(&self) -> MutexGuard<'_, Settings> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UnlockPolicy for SettingsStore {
    fn require_gate_on_launch(&self) -> bool {
        self.lock().require_gate_on_launch
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert!(s.require_gate_on_launch);
        assert_eq!(s.clipboard_clear_secs, 60);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = "require_gate_on_launch = false\nclipboard_clear_secs = 15\n";
        fs::write(tmp.path().join("passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.require_gate_on_launch);
        assert_eq!(settings.clipboard_clear_secs, 15);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("passvault.toml"), "clipboard_clear_secs = 5\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(settings.require_gate_on_launch);
        assert_eq!(settings.clipboard_clear_secs, 5);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("passvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings {
            require_gate_on_launch: false,
            clipboard_clear_secs: 30,
        };

        settings.save(tmp.path()).unwrap();
        assert_eq!(Settings::load(tmp.path()).unwrap(), settings);
    }

    #[test]
    fn save_creates_the_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("deep").join("config");

        Settings::default().save(&nested).unwrap();
        assert!(nested.join("passvault.toml").exists());
    }

    #[test]
    fn store_update_persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = SettingsStore::open(tmp.path().to_path_buf()).unwrap();
            store.update(|s| s.require_gate_on_launch = false).unwrap();
        }

        let reopened = SettingsStore::open(tmp.path().to_path_buf()).unwrap();
        assert!(!reopened.current().require_gate_on_launch);
    }

    #[test]
    fn store_reads_policy_at_call_time() {
        let tmp = TempDir::new().unwrap();
        let store = SettingsStore::open(tmp.path().to_path_buf()).unwrap();

        assert!(store.require_gate_on_launch());
        store.update(|s| s.require_gate_on_launch = false).unwrap();
        assert!(!store.require_gate_on_launch());
    }
}
