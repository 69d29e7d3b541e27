use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coursemate_ai::{ToolDefinition, ToolError, ToolExecutor};
use tracing::{debug, warn};

use super::{Source, Tool};

/// Tools keyed by name, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<(String, Arc<dyn Tool>)>,
    /// Tool that most recently produced a non-empty source list.
    last_source_tool: Mutex<Option<String>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its definition's name. A tool with the same
    /// name replaces the earlier one in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.definition().name;
        if name.trim().is_empty() {
            return Err(ToolError::InvalidDefinition(
                "tool must have a name in its definition".to_string(),
            ));
        }

        match self.tools.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => {
                debug!(tool = %name, "Replacing registered tool");
                slot.1 = tool;
            }
            None => {
                debug!(tool = %name, "Registered tool");
                self.tools.push((name, tool));
            }
        }
        Ok(())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|(_, tool)| tool.definition()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, tool)| tool)
    }

    /// Sources from the tool that most recently produced any.
    pub fn last_sources(&self) -> Vec<Source> {
        let recent = self
            .last_source_tool
            .lock()
            .ok()
            .and_then(|name| name.clone())
            .and_then(|name| self.get(&name).map(|tool| tool.last_sources()))
            .filter(|sources| !sources.is_empty());
        if let Some(sources) = recent {
            return sources;
        }

        self.tools
            .iter()
            .map(|(_, tool)| tool.last_sources())
            .find(|sources| !sources.is_empty())
            .unwrap_or_default()
    }

    pub fn reset_sources(&self) {
        for (_, tool) in &self.tools {
            tool.reset_sources();
        }
        if let Ok(mut last) = self.last_source_tool.lock() {
            *last = None;
        }
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute_tool(
        &self,
        name: &str,
        input: &serde_json::Value,
    ) -> Result<String, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!(tool = %name, "Model requested an unknown tool");
            return Ok(format!("Tool '{name}' not found"));
        };

        let output = tool.execute(input).await?;
        if !tool.last_sources().is_empty() {
            if let Ok(mut last) = self.last_source_tool.lock() {
                *last = Some(name.to_string());
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct StubTool {
        name: String,
        description: String,
        sources: Mutex<Vec<Source>>,
        emits: Vec<Source>,
        fails: bool,
    }

    impl StubTool {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                description: format!("{name} tool"),
                sources: Mutex::new(Vec::new()),
                emits: Vec::new(),
                fails: false,
            }
        }

        fn emitting(mut self, text: &str) -> Self {
            self.emits = vec![Source {
                text: text.to_string(),
                url: None,
            }];
            self
        }

        fn failing(mut self) -> Self {
            self.fails = true;
            self
        }

        fn described(mut self, description: &str) -> Self {
            self.description = description.to_string();
            self
        }
    }

    #[async_trait]
    impl Tool for StubTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters: json!({"type": "object"}),
            }
        }

        async fn execute(&self, input: &serde_json::Value) -> Result<String, ToolError> {
            if self.fails {
                return Err(ToolError::Execution(format!("{} broke", self.name)));
            }
            *self.sources.lock().unwrap() = self.emits.clone();
            Ok(format!("{} ran with {input}", self.name))
        }

        fn last_sources(&self) -> Vec<Source> {
            self.sources.lock().unwrap().clone()
        }

        fn reset_sources(&self) {
            self.sources.lock().unwrap().clear();
        }
    }

    #[test]
    fn registering_without_name_fails() {
        let mut registry = ToolRegistry::new();
        let err = registry.register(Arc::new(StubTool::new(""))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidDefinition(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_name_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(StubTool::new("a"))).unwrap();
        registry.register(Arc::new(StubTool::new("b"))).unwrap();
        registry
            .register(Arc::new(StubTool::new("a").described("second a")))
            .unwrap();

        assert_eq!(registry.names(), vec!["a", "b"]);
        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].description, "second a");
    }

    #[tokio::test]
    async fn unknown_tool_is_a_plain_result() {
        let registry = ToolRegistry::new();
        let output = registry.execute_tool("missing", &json!({})).await.unwrap();
        assert_eq!(output, "Tool 'missing' not found");
    }

    #[tokio::test]
    async fn dispatches_by_name_and_propagates_errors() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(StubTool::new("ok"))).unwrap();
        registry.register(Arc::new(StubTool::new("bad").failing())).unwrap();

        let output = registry.execute_tool("ok", &json!({"q": 1})).await.unwrap();
        assert_eq!(output, r#"ok ran with {"q":1}"#);
        let err = registry.execute_tool("bad", &json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "bad broke");
    }

    #[tokio::test]
    async fn last_sources_follow_most_recent_tool() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(StubTool::new("first").emitting("from first")))
            .unwrap();
        registry
            .register(Arc::new(StubTool::new("second").emitting("from second")))
            .unwrap();
        assert!(registry.last_sources().is_empty());

        registry.execute_tool("first", &json!({})).await.unwrap();
        registry.execute_tool("second", &json!({})).await.unwrap();
        assert_eq!(registry.last_sources()[0].text, "from second");
    }

    #[tokio::test]
    async fn reset_sources_is_idempotent() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(StubTool::new("search").emitting("Course - Lesson 1")))
            .unwrap();
        registry.execute_tool("search", &json!({})).await.unwrap();
        assert_eq!(registry.last_sources().len(), 1);

        registry.reset_sources();
        assert!(registry.last_sources().is_empty());
        registry.reset_sources();
        assert!(registry.last_sources().is_empty());
    }
}
