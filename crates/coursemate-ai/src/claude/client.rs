//! Claude API client struct, request building, and response parsing.

use tracing::debug;

use crate::tools::to_claude_tool;
use crate::{AiError, AiResponse, ContentBlock, MessageRequest, StopReason, TokenUsage, ToolChoice};

use super::config::{AuthMethod, ClaudeConfig};

pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API client.
pub struct ClaudeClient {
    pub(crate) config: ClaudeConfig,
    pub(crate) http: reqwest::Client,
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Build auth headers for the configured auth method.
    pub(crate) fn auth_headers(&self) -> Result<reqwest::header::HeaderMap, AiError> {
        let invalid = |e: reqwest::header::InvalidHeaderValue| {
            AiError::NotConfigured(format!("invalid credential header: {e}"))
        };

        let mut headers = reqwest::header::HeaderMap::new();
        match self.config.auth_method {
            AuthMethod::ApiKey => {
                headers.insert("x-api-key", self.config.token.parse().map_err(invalid)?);
            }
            AuthMethod::OAuth => {
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {}", self.config.token)
                        .parse()
                        .map_err(invalid)?,
                );
            }
        }
        headers.insert(
            "anthropic-version",
            reqwest::header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }

    /// Build the JSON request body for the Messages API.
    pub(crate) fn build_request_body(&self, request: &MessageRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": request.messages,
        });

        if !request.system.is_empty() {
            body["system"] = serde_json::json!(request.system);
        }

        if !request.tools.is_empty() {
            let tool_defs: Vec<_> = request.tools.iter().map(to_claude_tool).collect();
            body["tools"] = serde_json::json!(tool_defs);

            if let Some(ToolChoice::Auto) = request.tool_choice {
                body["tool_choice"] = serde_json::json!({"type": "auto"});
            }
        }

        body
    }

    /// Parse a non-streaming response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let blocks = json["content"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("response has no content array".into()))?;

        let content = blocks
            .iter()
            .filter_map(|b| match serde_json::from_value::<ContentBlock>(b.clone()) {
                Ok(block) => Some(block),
                Err(e) => {
                    debug!(block_type = %b["type"], "Skipping unsupported content block: {e}");
                    None
                }
            })
            .collect();

        let stop_reason = serde_json::from_value::<StopReason>(json["stop_reason"].clone())
            .unwrap_or(StopReason::Other);

        let usage = TokenUsage {
            input_tokens: json["usage"]["input_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["output_tokens"].as_u64().unwrap_or(0),
        };

        Ok(AiResponse {
            content,
            stop_reason,
            usage,
        })
    }
}
