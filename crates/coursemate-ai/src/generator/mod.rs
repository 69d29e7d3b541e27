//! Response generator.
//!
//! Turns a user query into a final answer, optionally letting the model
//! call tools for a bounded number of sequential rounds. Every failure
//! path ends in a string answer; nothing here returns an error.

mod prompt;
mod rounds;


pub use prompt::SYSTEM_PROMPT;

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::token_tracker::TokenTracker;
use crate::tools::ToolExecutor;
use crate::{
    AiClient, AiError, AiResponse, Message, MessageRequest, TokenUsage, ToolChoice, ToolDefinition,
};

/// Fixed parameters copied into every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Hard ceiling on sequential tool-calling rounds per query.
    pub max_tool_rounds: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            temperature: 0.0,
            max_tokens: 800,
            max_tool_rounds: 2,
        }
    }
}

/// Drives LLM calls and tool rounds for one query at a time.
pub struct AiGenerator {
    client: Arc<dyn AiClient>,
    settings: GenerationSettings,
    tracker: Mutex<TokenTracker>,
}

impl AiGenerator {
    pub fn new(client: Arc<dyn AiClient>, settings: GenerationSettings) -> Self {
        Self {
            client,
            settings,
            tracker: Mutex::new(TokenTracker::new()),
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Cumulative `(calls, usage)` for successful LLM calls so far.
    pub fn usage(&self) -> (u64, TokenUsage) {
        match self.tracker.lock() {
            Ok(tracker) => (tracker.call_count(), *tracker.total()),
            Err(_) => (0, TokenUsage::default()),
        }
    }

    /// Produce the final answer for `query`.
    ///
    /// With both tool definitions and an executor, runs up to
    /// `max_tool_rounds` sequential tool rounds; otherwise makes a single
    /// call and never executes tools.
    pub async fn generate(
        &self,
        query: &str,
        history: Option<&str>,
        tools: &[ToolDefinition],
        executor: Option<&dyn ToolExecutor>,
    ) -> String {
        let system = prompt::build_system_content(history);

        match executor {
            Some(executor) if !tools.is_empty() => {
                self.run_tool_rounds(query, &system, tools, executor).await
            }
            _ => self.single_call(query, &system, tools).await,
        }
    }

    async fn single_call(&self, query: &str, system: &str, tools: &[ToolDefinition]) -> String {
        let messages = vec![Message::user_text(query)];
        let request = self.request(system, &messages, tools);

        match self.call(&request).await {
            Ok(response) => {
                if response.requests_tools() {
                    debug!("Model requested tools but no executor is available");
                }
                response.text()
            }
            Err(e) => {
                warn!(error = %e, "LLM call failed");
                format!("Unable to process request due to system error: {e}")
            }
        }
    }

    /// Build a fresh request from the settings template.
    fn request(&self, system: &str, messages: &[Message], tools: &[ToolDefinition]) -> MessageRequest {
        MessageRequest {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            system: system.to_string(),
            messages: messages.to_vec(),
            tools: tools.to_vec(),
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some(ToolChoice::Auto)
            },
        }
    }

    async fn call(&self, request: &MessageRequest) -> Result<AiResponse, AiError> {
        let response = self.client.create_message(request).await?;
        if let Ok(mut tracker) = self.tracker.lock() {
            tracker.record(&request.model, &response.usage);
        }
        Ok(response)
    }
}
