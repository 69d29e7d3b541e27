//! coursemate configuration system.
//!
//! TOML-based configuration for the course-materials chatbot: model
//! settings, search limits, session history, and logging. Every section
//! has defaults so partial files work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use coursemate_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{CoursemateConfig, LogLevel, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{default_config_path, load_from_path};

use coursemate_common::ConfigError;
use std::path::Path;

/// Load and validate config from the default path, creating it if missing.
pub fn load_config() -> Result<CoursemateConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path when given, otherwise the default path.
pub fn load_config_from(path: Option<&Path>) -> Result<CoursemateConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = toml_loader::load_from_path(path)?;
            validation::validate(&config)?;
            Ok(config)
        }
        None => load_config(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &CoursemateConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
