//! Language-model call settings.

use serde::{Deserialize, Serialize};

/// Model and sampling settings for every LLM call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub model: String,
    /// Upper bound on output tokens per call (valid range: 1-8192).
    pub max_tokens: u32,
    /// Sampling temperature; kept at 0 for deterministic answers.
    pub temperature: f64,
    /// Sequential tool-calling rounds per query (valid range: 1-10).
    pub max_tool_rounds: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 800,
            temperature: 0.0,
            max_tool_rounds: 2,
        }
    }
}
