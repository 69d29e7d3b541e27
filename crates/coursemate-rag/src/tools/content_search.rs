use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coursemate_ai::{ToolDefinition, ToolError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{parse_args, Source, Tool};
use crate::vector_store::{SearchResults, VectorStore};

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    course_name: Option<String>,
    #[serde(default)]
    lesson_number: Option<u32>,
}

/// Searches course content with fuzzy course names and lesson filtering.
pub struct ContentSearchTool {
    store: Arc<VectorStore>,
    last_sources: Mutex<Vec<Source>>,
}

impl ContentSearchTool {
    pub const NAME: &'static str = "search_course_content";

    pub fn new(store: Arc<VectorStore>) -> Self {
        Self {
            store,
            last_sources: Mutex::new(Vec::new()),
        }
    }

    fn set_sources(&self, sources: Vec<Source>) {
        if let Ok(mut last) = self.last_sources.lock() {
            *last = sources;
        }
    }

    async fn format_results(&self, results: &SearchResults) -> (String, Vec<Source>) {
        let mut formatted = Vec::with_capacity(results.len());
        let mut sources = Vec::with_capacity(results.len());

        for (document, metadata) in results.documents.iter().zip(&results.metadata) {
            let course_title = metadata
                .get("course_title")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            let lesson_number = metadata
                .get("lesson_number")
                .and_then(|v| v.as_u64())
                .and_then(|n| u32::try_from(n).ok());

            let label = match lesson_number {
                Some(n) => format!("{course_title} - Lesson {n}"),
                None => course_title.to_string(),
            };
            let url = match lesson_number {
                Some(n) => self.store.get_lesson_link(course_title, n).await,
                None => None,
            };

            formatted.push(format!("[{label}]\n{document}"));
            sources.push(Source { text: label, url });
        }

        (formatted.join("\n\n"), sources)
    }
}

fn no_content_message(course_name: Option<&str>, lesson_number: Option<u32>) -> String {
    let mut message = String::from("No relevant content found");
    if let Some(course) = course_name {
        message.push_str(&format!(" in course '{course}'"));
    }
    if let Some(lesson) = lesson_number {
        message.push_str(&format!(" in lesson {lesson}"));
    }
    message.push('.');
    message
}

#[async_trait]
impl Tool for ContentSearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search course materials with smart course name matching and lesson filtering"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "What to search for in the course content"
                    },
                    "course_name": {
                        "type": "string",
                        "description": "Course title (partial matches work, e.g. 'MCP', 'Introduction')"
                    },
                    "lesson_number": {
                        "type": "integer",
                        "description": "Specific lesson number to search within (e.g. 1, 2, 3)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, input: &serde_json::Value) -> Result<String, ToolError> {
        let args: SearchArgs = parse_args(input)?;
        let results = self
            .store
            .search(
                &args.query,
                args.course_name.as_deref(),
                args.lesson_number,
                None,
            )
            .await;

        if let Some(error) = &results.error {
            debug!(error = %error, "Content search returned an error");
            self.set_sources(Vec::new());
            return Ok(error.clone());
        }

        if results.is_empty() {
            self.set_sources(Vec::new());
            return Ok(no_content_message(
                args.course_name.as_deref(),
                args.lesson_number,
            ));
        }

        let (formatted, sources) = self.format_results(&results).await;
        self.set_sources(sources);
        Ok(formatted)
    }

    fn last_sources(&self) -> Vec<Source> {
        self.last_sources
            .lock()
            .map(|sources| sources.clone())
            .unwrap_or_default()
    }

    fn reset_sources(&self) {
        self.set_sources(Vec::new());
    }
}
