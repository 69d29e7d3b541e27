use std::sync::Arc;

use async_trait::async_trait;
use coursemate_ai::{ToolDefinition, ToolError};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::{parse_args, Tool};
use crate::models::Lesson;
use crate::vector_store::{parse_lessons, VectorStore};

#[derive(Debug, Deserialize)]
struct OutlineArgs {
    course_title: String,
}

/// Renders a course's title, link and ordered lesson list.
pub struct OutlineTool {
    store: Arc<VectorStore>,
}

impl OutlineTool {
    pub const NAME: &'static str = "get_course_outline";

    pub fn new(store: Arc<VectorStore>) -> Self {
        Self { store }
    }
}

fn format_outline(title: &str, course_link: Option<&str>, mut lessons: Vec<Lesson>) -> String {
    let mut lines = vec![
        format!("**{title}**"),
        format!("Course Link: {}", course_link.unwrap_or("No link available")),
        String::new(),
    ];

    if lessons.is_empty() {
        lines.push("No lessons found for this course.".to_string());
    } else {
        lines.push("**Course Lessons:**".to_string());
        lessons.sort_by_key(|lesson| lesson.lesson_number);
        for lesson in lessons {
            let mut line = format!("{}. {}", lesson.lesson_number, lesson.title);
            if let Some(link) = lesson.lesson_link {
                line.push_str(&format!(" - [Link]({link})"));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}

#[async_trait]
impl Tool for OutlineTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get complete course outline including course title, course link, and all lessons with their titles and links"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "course_title": {
                        "type": "string",
                        "description": "Course title (partial matches work, e.g. 'MCP', 'Introduction')"
                    }
                },
                "required": ["course_title"]
            }),
        }
    }

    async fn execute(&self, input: &serde_json::Value) -> Result<String, ToolError> {
        let args: OutlineArgs = parse_args(input)?;

        let Some(title) = self.store.resolve_course_name(&args.course_title).await else {
            return Ok(format!("No course found matching '{}'", args.course_title));
        };

        let record = match self.store.course_record(&title).await {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(format!("Course metadata not found for '{title}'")),
            Err(e) => {
                warn!(course = %title, error = %e, "Outline lookup failed");
                return Ok(format!("Error retrieving course outline: {e}"));
            }
        };

        let Some(lessons) = parse_lessons(&record) else {
            return Ok(format!("Invalid lesson data for course '{title}'"));
        };

        let course_link = record.get("course_link").and_then(|v| v.as_str());
        Ok(format_outline(&title, course_link, lessons))
    }
}
