//! Tools the model can call during a query.

mod content_search;
mod outline;
mod registry;

pub use content_search::ContentSearchTool;
pub use outline::OutlineTool;
pub use registry::ToolRegistry;

use async_trait::async_trait;
use coursemate_ai::{ToolDefinition, ToolError};
use serde::{Deserialize, Serialize};

/// Display reference to the material behind an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A named capability the model may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn execute(&self, input: &serde_json::Value) -> Result<String, ToolError>;

    /// Sources produced by the most recent execution.
    fn last_sources(&self) -> Vec<Source> {
        Vec::new()
    }

    fn reset_sources(&self) {}
}

/// Deserialize a tool's input object into its argument struct.
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(
    input: &serde_json::Value,
) -> Result<T, ToolError> {
    T::deserialize(input).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}
