//! Tool-calling seam between the response generator and concrete tools.
//!
//! The generator only knows tool *definitions* (sent to the model) and a
//! `ToolExecutor` that runs a named tool. Failures come back as `ToolError`
//! values and are turned into tool-result text at the call site.

use async_trait::async_trait;

use crate::ToolDefinition;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid tool definition: {0}")]
    InvalidDefinition(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Execution(String),
}

/// Runs a tool by name with the model-supplied input object.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute_tool(&self, name: &str, input: &serde_json::Value)
        -> Result<String, ToolError>;
}

/// Convert a tool definition to the Claude API format.
pub fn to_claude_tool(tool: &ToolDefinition) -> serde_json::Value {
    serde_json::json!({
        "name": tool.name,
        "description": tool.description,
        "input_schema": tool.parameters,
    })
}
