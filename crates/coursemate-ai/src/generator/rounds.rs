//! Sequential tool-round loop.

use tracing::{debug, info, warn};

use crate::tools::ToolExecutor;
use crate::{AiResponse, ContentBlock, Message, Role, ToolDefinition};

use super::AiGenerator;

/// Tool results gathered from one model response.
struct RoundOutcome {
    results: Vec<ContentBlock>,
    succeeded: usize,
    failed: usize,
}

impl AiGenerator {
    pub(super) async fn run_tool_rounds(
        &self,
        query: &str,
        system: &str,
        tools: &[ToolDefinition],
        executor: &dyn ToolExecutor,
    ) -> String {
        let mut messages = vec![Message::user_text(query)];
        // Text from the latest tool-requesting response, used if a later call fails.
        let mut fallback: Option<String> = None;

        for round in 1..=self.settings.max_tool_rounds {
            let request = self.request(system, &messages, tools);
            let response = match self.call(&request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(round, error = %e, "LLM call failed during tool rounds");
                    return fallback.filter(|t| !t.is_empty()).unwrap_or_else(|| {
                        format!("Unable to process request due to system error: {e}")
                    });
                }
            };

            if !response.requests_tools() {
                debug!(round, "Model answered without requesting tools");
                return response.text();
            }

            fallback = Some(response.text());

            let outcome = execute_tool_calls(&response, executor).await;
            messages.push(Message {
                role: Role::Assistant,
                content: response.content,
            });
            if !outcome.results.is_empty() {
                messages.push(Message {
                    role: Role::User,
                    content: outcome.results,
                });
            }

            if outcome.succeeded == 0 {
                info!(round, failed = outcome.failed, "No tool call succeeded, ending rounds early");
                break;
            }
            if outcome.failed > 0 {
                debug!(round, failed = outcome.failed, "Continuing with partial tool results");
            }
        }

        let request = self.request(system, &messages, &[]);
        match self.call(&request).await {
            Ok(response) => response.text(),
            Err(e) => {
                warn!(error = %e, "Final LLM call failed");
                fallback
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Unable to generate final response: {e}"))
            }
        }
    }
}

/// Run every tool call in `response`, converting failures into result text.
async fn execute_tool_calls(response: &AiResponse, executor: &dyn ToolExecutor) -> RoundOutcome {
    let mut outcome = RoundOutcome {
        results: Vec::new(),
        succeeded: 0,
        failed: 0,
    };

    for (id, name, input) in response.tool_uses() {
        debug!(tool = %name, id = %id, "Executing tool");
        match executor.execute_tool(name, input).await {
            Ok(result) => {
                outcome.results.push(ContentBlock::tool_result(id, result));
                outcome.succeeded += 1;
            }
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool execution failed");
                outcome
                    .results
                    .push(ContentBlock::tool_result(id, format!("Tool execution failed: {e}")));
                outcome.failed += 1;
            }
        }
    }

    outcome
}
