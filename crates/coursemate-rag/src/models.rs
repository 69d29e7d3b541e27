use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_number: u32,
    #[serde(rename = "lesson_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_link: Option<String>,
}

/// A course and its lessons. The title is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Course {
    pub fn lesson(&self, lesson_number: u32) -> Option<&Lesson> {
        self.lessons
            .iter()
            .find(|lesson| lesson.lesson_number == lesson_number)
    }
}

/// A searchable piece of course text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseChunk {
    pub content: String,
    pub course_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_number: Option<u32>,
    pub chunk_index: u32,
}

/// One course in a pre-chunked JSON catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub course: Course,
    #[serde(default)]
    pub chunks: Vec<CourseChunk>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_uses_stored_field_names() {
        let lesson = Lesson {
            lesson_number: 2,
            title: "Tools".into(),
            lesson_link: None,
        };
        let json = serde_json::to_value(&lesson).unwrap();
        assert_eq!(json, serde_json::json!({"lesson_number": 2, "lesson_title": "Tools"}));
    }

    #[test]
    fn catalog_entry_parses_with_optional_fields_missing() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{
                "course": {"title": "Intro to MCP", "lessons": [{"lesson_number": 0, "lesson_title": "Welcome"}]},
                "chunks": [{"content": "hello", "course_title": "Intro to MCP", "chunk_index": 0}]
            }"#,
        )
        .unwrap();
        assert_eq!(entry.course.instructor, None);
        assert_eq!(entry.course.lesson(0).unwrap().title, "Welcome");
        assert!(entry.course.lesson(1).is_none());
        assert_eq!(entry.chunks[0].lesson_number, None);
    }
}
