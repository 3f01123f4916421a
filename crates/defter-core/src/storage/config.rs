//! Shell configuration.
//!
//! Presentation settings persisted per user in `defter.toml`. A missing file
//! falls back to defaults; a malformed file is a startup error rather than a
//! silent fallback, so a typo cannot flip the shell into the wrong layout.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::kernel::constants;
use crate::shell::LayoutDirection;
use crate::storage::error::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Title of the top-level window.
    pub window_title: String,
    /// Layout direction applied uniformly to the whole shell.
    pub layout_direction: LayoutDirection,
    /// Named visual style applied uniformly to the whole shell.
    pub style: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window_title: format!("{} — Business Suite", constants::APP_NAME),
            layout_direction: LayoutDirection::LeftToRight,
            style: "default".to_string(),
        }
    }
}

/// Load the shell configuration from `defter.toml` under the given config
/// directory, falling back to defaults when the file does not exist.
pub fn load_shell_config(config_dir: &Path) -> Result<ShellConfig, StorageError> {
    let path = config_dir.join(constants::CONFIG_FILE_NAME);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("no configuration at {}, using defaults", path.display());
            return Ok(ShellConfig::default());
        }
        Err(e) => return Err(StorageError::io(e, "read configuration", path)),
    };
    let config =
        toml::from_str(&raw).map_err(|source| StorageError::ConfigParse { path, source })?;
    Ok(config)
}
