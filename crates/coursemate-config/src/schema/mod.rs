//! Configuration schema types for coursemate.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the chatbot ships with.

mod ai;
mod logging;
mod search;
mod session;

pub use ai::*;
pub use logging::*;
pub use search::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for coursemate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CoursemateConfig {
    pub ai: AiConfig,
    pub search: SearchConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
