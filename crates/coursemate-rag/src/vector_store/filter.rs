//! Metadata filters for similarity queries.

use serde_json::{json, Value};

use super::Metadata;

/// A condition on record metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { field: String, value: Value },
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        match self {
            Filter::Eq { field, value } => metadata.get(field) == Some(value),
            Filter::And(filters) => filters.iter().all(|f| f.matches(metadata)),
        }
    }

    /// Render in the `where` clause shape used by Chroma-style engines.
    pub fn to_json(&self) -> Value {
        match self {
            Filter::Eq { field, value } => {
                let mut clause = Metadata::new();
                clause.insert(field.clone(), value.clone());
                Value::Object(clause)
            }
            Filter::And(filters) => {
                json!({ "$and": filters.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
        }
    }
}

/// Filter for an optional course title and optional lesson number.
pub fn build_filter(course_title: Option<&str>, lesson_number: Option<u32>) -> Option<Filter> {
    match (course_title, lesson_number) {
        (None, None) => None,
        (Some(title), None) => Some(Filter::eq("course_title", title)),
        (None, Some(lesson)) => Some(Filter::eq("lesson_number", lesson)),
        (Some(title), Some(lesson)) => Some(Filter::And(vec![
            Filter::eq("course_title", title),
            Filter::eq("lesson_number", lesson),
        ])),
    }
}
