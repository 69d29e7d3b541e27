//! Core TOML config loading: read from path or platform default.

use crate::schema::CoursemateConfig;
use coursemate_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{create_default_config, default_config_path};

/// Parse the config file at `path`.
///
/// Missing fields take their serde defaults. Values are returned as written,
/// without range checks: `crate::load_config_from` validates them and reports
/// every violation as a `ConfigError::ValidationError`.
pub fn load_from_path(path: &Path) -> Result<CoursemateConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: CoursemateConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `COURSEMATE_CONFIG` or the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/coursemate/config.toml`
/// On Linux: `~/.config/coursemate/config.toml`
///
/// A missing file is created from the commented template and defaults are returned.
pub fn load_default() -> Result<CoursemateConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(CoursemateConfig::default())
        }
        Err(e) => Err(e),
    }
}
