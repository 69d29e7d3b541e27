//! Conversation history settings.

use serde::{Deserialize, Serialize};

/// Per-session history retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Exchanges kept per session; each exchange is two messages.
    /// Zero disables history entirely.
    pub max_history: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_history: 5 }
    }
}
