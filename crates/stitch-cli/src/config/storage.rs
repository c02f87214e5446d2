//! Config storage for persisting the table address and token.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stitch_core::FieldNames;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored configuration. Every value can be overridden per command.
#[derive(Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredConfig {
    pub service: Option<String>,
    pub base_id: Option<String>,
    pub table: Option<String>,
    pub token: Option<String>,
    pub fields: FieldNames,
}

impl fmt::Debug for StoredConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredConfig")
            .field("service", &self.service)
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("fields", &self.fields)
            .finish()
    }
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "stitch").context("Could not determine config directory")?;

    let config_dir = dirs.config_dir();
    fs::create_dir_all(config_dir).context("Failed to create config directory")?;

    Ok(config_dir.join("config.json"))
}

/// Save the config to disk.
pub fn save_config(config: &StoredConfig) -> Result<PathBuf> {
    let path = config_path()?;
    let json = serde_json::to_string_pretty(config)?;

    fs::write(&path, &json).context("Failed to write config file")?;

    // The file may hold the access token.
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

/// Load the config from disk.
pub fn load_config() -> Result<Option<StoredConfig>> {
    let path = config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "No config file");
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read config file")?;
    let config: StoredConfig = serde_json::from_str(&json).context("Invalid config file")?;

    Ok(Some(config))
}
