//! Configuration types and loading.
//!
//! The configuration file is optional and uses JSONC (JSON with comments).

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{APP_NAME, DEFAULT_MSG_COMMAND};
use crate::utils::path::expand;

/// File names looked up inside each configuration directory, in order.
const CONFIG_FILE_NAMES: [&str; 2] = ["config.jsonc", "config.json"];

/// Root configuration for wslevels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelsConfig {
    /// How to reach the window manager.
    pub window_manager: WindowManagerConfig,

    /// Where level-visit memory is kept.
    pub state: StateConfig,
}

/// Window manager connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowManagerConfig {
    /// Message binary used to query and command the window manager.
    ///
    /// Use `"i3-msg"` for i3 and `"swaymsg"` for sway. Bare names are looked up
    /// on `PATH`; absolute paths are used as-is.
    pub msg_command: String,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            msg_command: DEFAULT_MSG_COMMAND.to_string(),
        }
    }
}

/// Level-visit state settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StateConfig {
    /// Path of the state file. Supports `~`.
    ///
    /// Defaults to `~/.wslevels/state.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl StateConfig {
    /// Returns the state file path, falling back to the per-user default.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        match self.path.as_deref().map(expand) {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => default_state_path(),
        }
    }
}

/// Returns the default per-user state file location.
///
/// Uses `~/.wslevels/state.json`, or `/tmp/wslevels/state.json` when no home
/// directory is available.
#[must_use]
pub fn default_state_path() -> PathBuf {
    dirs::home_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_NAME}/state.json")),
        |home| home.join(format!(".{APP_NAME}")).join("state.json"),
    )
}

/// Errors that can occur when loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error("No configuration file found")]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Returns the candidate configuration file paths, most preferred first.
///
/// Looks in `$XDG_CONFIG_HOME/wslevels/`, `~/.config/wslevels/` and the
/// platform configuration directory.
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_search = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        dirs_to_search.push(PathBuf::from(xdg_config).join(APP_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        dirs_to_search.push(home.join(".config").join(APP_NAME));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_search.push(config_dir.join(APP_NAME));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_search {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Loads the first configuration file found in [`config_paths`].
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no file exists, or an I/O or parse error
/// for the file that was found.
pub fn load_config() -> Result<(LevelsConfig, PathBuf), ConfigError> {
    let path = config_paths().into_iter().find(|path| path.exists()).ok_or(ConfigError::NotFound)?;
    let config = load_config_from_path(&path)?;
    Ok((config, path))
}

/// Loads the configuration from a specific JSONC file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, or a parse error if it is
/// not valid configuration JSON.
pub fn load_config_from_path(path: &Path) -> Result<LevelsConfig, ConfigError> {
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    Ok(serde_json::from_reader(reader)?)
}
