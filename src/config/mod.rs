//! Configuration for sleepctl.
//!
//! Settings are loaded from a TOML file, `sleepctl.toml`, searched under
//! `$XDG_CONFIG_HOME/sleepctl/` (via the `dirs` crate). A default file is
//! generated on first load. A custom configuration directory can be set
//! once per process with `--config`.
//!
//! ```toml
//! lock_keyring_suspend = false   # Lock the keyring before suspending
//! lock_keyring_hibernate = false # Lock the keyring before hibernating
//! network_sleep = true           # Put NetworkManager to sleep around a transition
//! ```
//!
//! All keys are optional; unknown keys are rejected so typos don't
//! silently disable an option.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::constants::*;

/// Custom configuration directory, set once at startup.
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Settings read at controller construction and snapshotted for the call.
///
/// Each option gates one best-effort step of the suspend/hibernate
/// sequence; none of them affects shutdown.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Lock the Secret Service keyring before suspending.
    pub lock_keyring_suspend: Option<bool>,
    /// Lock the Secret Service keyring before hibernating.
    pub lock_keyring_hibernate: Option<bool>,
    /// Put NetworkManager to sleep before the transition and wake it after.
    pub network_sleep: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_keyring_suspend: Some(DEFAULT_LOCK_KEYRING_SUSPEND),
            lock_keyring_hibernate: Some(DEFAULT_LOCK_KEYRING_HIBERNATE),
            network_sleep: Some(DEFAULT_NETWORK_SLEEP),
        }
    }
}

impl Config {
    /// Load configuration using automatic path detection.
    ///
    /// Creates a default configuration file if none exists.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            create_default_config(&config_path)
                .context("Failed to create default config during load")?;
        }

        Self::load_from_path(&config_path)
            .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
    }

    /// Load configuration from a specific path.
    ///
    /// This version does NOT create a default config if the path is missing.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Ok(config)
    }

    pub fn lock_keyring_suspend(&self) -> bool {
        self.lock_keyring_suspend
            .unwrap_or(DEFAULT_LOCK_KEYRING_SUSPEND)
    }

    pub fn lock_keyring_hibernate(&self) -> bool {
        self.lock_keyring_hibernate
            .unwrap_or(DEFAULT_LOCK_KEYRING_HIBERNATE)
    }

    pub fn network_sleep(&self) -> bool {
        self.network_sleep.unwrap_or(DEFAULT_NETWORK_SLEEP)
    }

    /// Print the loaded configuration block.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!(
            "Lock keyring on suspend: {}",
            self.lock_keyring_suspend()
        );
        log_indented!(
            "Lock keyring on hibernate: {}",
            self.lock_keyring_hibernate()
        );
        log_indented!("Network sleep: {}", self.network_sleep());
    }
}

/// Get the configuration file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = CONFIG_DIR.get().and_then(|d| d.clone()) {
        return Ok(custom_dir.join("sleepctl.toml"));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("sleepctl").join("sleepctl.toml"))
}

/// Write the commented default configuration file.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = format!(
        "\
#[sleepctl config]
lock_keyring_suspend = {DEFAULT_LOCK_KEYRING_SUSPEND}   # Lock the keyring before suspending
lock_keyring_hibernate = {DEFAULT_LOCK_KEYRING_HIBERNATE} # Lock the keyring before hibernating
network_sleep = {DEFAULT_NETWORK_SLEEP}            # Put NetworkManager to sleep around a transition
"
    );

    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests;
