//! Configuration module for wslevels.
//!
//! The configuration file is optional. When it is missing every setting takes
//! its default; when it is broken a warning is logged and defaults are used so
//! a keybinding never stops working because of a typo.

pub mod types;

use std::path::Path;

pub use types::{
    ConfigError, LevelsConfig, StateConfig, WindowManagerConfig, config_paths, default_state_path,
    load_config, load_config_from_path,
};

/// Loads the configuration for this invocation.
///
/// A custom path (from `--config`) must exist and parse. Without one, the
/// default search paths are tried and any failure falls back to defaults.
///
/// # Errors
///
/// Returns an error only for a custom path that is missing or invalid.
pub fn load(custom_path: Option<&Path>) -> Result<LevelsConfig, ConfigError> {
    if let Some(path) = custom_path {
        if !path.exists() {
            return Err(ConfigError::NotFound);
        }
        let config = load_config_from_path(path)?;
        tracing::debug!(path = %path.display(), "loaded custom configuration");
        return Ok(config);
    }

    Ok(load_or_default())
}

fn load_or_default() -> LevelsConfig {
    match load_config() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            config
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            LevelsConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            LevelsConfig::default()
        }
    }
}
