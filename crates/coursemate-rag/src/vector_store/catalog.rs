//! Ingestion and read-only catalog projections.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{Course, CourseChunk, Lesson};

use super::{
    Collection, GetResult, Metadata, StoreError, VectorStore, CATALOG_COLLECTION,
    CONTENT_COLLECTION,
};

impl VectorStore {
    /// Add one catalog record for `course`, keyed by its title.
    pub async fn add_course_metadata(&self, course: &Course) -> Result<(), StoreError> {
        let metadata = course_metadata(course)?;
        self.catalog()
            .await?
            .add(vec![course.title.clone()], vec![metadata], vec![course.title.clone()])
            .await?;
        debug!(course = %course.title, lessons = course.lessons.len(), "Added course metadata");
        Ok(())
    }

    /// Add content chunks. Ids are `<title with underscores>_<chunk_index>`.
    pub async fn add_course_content(&self, chunks: &[CourseChunk]) -> Result<(), StoreError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let mut documents = Vec::with_capacity(chunks.len());
        let mut metadatas = Vec::with_capacity(chunks.len());
        let mut ids = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            documents.push(chunk.content.clone());
            metadatas.push(chunk_metadata(chunk));
            ids.push(chunk_id(chunk));
        }

        self.content().await?.add(documents, metadatas, ids).await?;
        debug!(chunks = chunks.len(), "Added course content");
        Ok(())
    }

    /// Drop and recreate both collections.
    pub async fn clear_all_data(&self) -> Result<(), StoreError> {
        for name in [CATALOG_COLLECTION, CONTENT_COLLECTION] {
            match self.backend.delete_collection(name).await {
                Ok(()) | Err(StoreError::CollectionNotFound(_)) => {}
                Err(e) => return Err(e),
            }
            self.backend.get_or_create_collection(name).await?;
        }
        info!("Cleared all course data");
        Ok(())
    }

    pub async fn get_existing_course_titles(&self) -> Vec<String> {
        match self.all_course_records().await {
            Ok(records) => records.ids,
            Err(e) => {
                warn!(error = %e, "Failed to list course titles");
                Vec::new()
            }
        }
    }

    pub async fn get_course_count(&self) -> usize {
        self.get_existing_course_titles().await.len()
    }

    /// Every catalog record as a `Course`; records that fail to parse are skipped.
    pub async fn get_all_courses_metadata(&self) -> Vec<Course> {
        match self.all_course_records().await {
            Ok(records) => records
                .metadatas
                .iter()
                .filter_map(|meta| {
                    let course = course_from_metadata(meta);
                    if course.is_none() {
                        warn!(title = ?meta.get("title"), "Skipping malformed course record");
                    }
                    course
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "Failed to read course metadata");
                Vec::new()
            }
        }
    }

    /// Raw catalog metadata for an exact course title.
    pub async fn course_record(&self, course_title: &str) -> Result<Option<Metadata>, StoreError> {
        let ids = [course_title.to_string()];
        let result = self.catalog().await?.get(Some(&ids[..])).await?;
        Ok(result.metadatas.into_iter().next())
    }

    pub async fn get_course_link(&self, course_title: &str) -> Option<String> {
        let record = self.lookup_record(course_title).await?;
        string_field(&record, "course_link")
    }

    pub async fn get_lesson_link(&self, course_title: &str, lesson_number: u32) -> Option<String> {
        let record = self.lookup_record(course_title).await?;
        parse_lessons(&record)?
            .into_iter()
            .find(|lesson| lesson.lesson_number == lesson_number)
            .and_then(|lesson| lesson.lesson_link)
    }

    async fn lookup_record(&self, course_title: &str) -> Option<Metadata> {
        match self.course_record(course_title).await {
            Ok(record) => record,
            Err(e) => {
                warn!(course = %course_title, error = %e, "Catalog lookup failed");
                None
            }
        }
    }

    async fn all_course_records(&self) -> Result<GetResult, StoreError> {
        self.catalog().await?.get(None).await
    }
}

fn course_metadata(course: &Course) -> Result<Metadata, StoreError> {
    let mut metadata = Metadata::new();
    metadata.insert("title".into(), Value::from(course.title.as_str()));
    if let Some(instructor) = &course.instructor {
        metadata.insert("instructor".into(), Value::from(instructor.as_str()));
    }
    if let Some(link) = &course.course_link {
        metadata.insert("course_link".into(), Value::from(link.as_str()));
    }
    metadata.insert(
        "lessons_json".into(),
        Value::from(serde_json::to_string(&course.lessons)?),
    );
    metadata.insert("lesson_count".into(), Value::from(course.lessons.len()));
    Ok(metadata)
}

fn chunk_metadata(chunk: &CourseChunk) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("course_title".into(), Value::from(chunk.course_title.as_str()));
    if let Some(lesson) = chunk.lesson_number {
        metadata.insert("lesson_number".into(), Value::from(lesson));
    }
    metadata.insert("chunk_index".into(), Value::from(chunk.chunk_index));
    metadata
}

fn chunk_id(chunk: &CourseChunk) -> String {
    format!("{}_{}", chunk.course_title.replace(' ', "_"), chunk.chunk_index)
}

fn string_field(metadata: &Metadata, key: &str) -> Option<String> {
    metadata.get(key)?.as_str().map(str::to_string)
}

/// Lessons stored in a catalog record; `None` when missing or corrupt.
pub(crate) fn parse_lessons(metadata: &Metadata) -> Option<Vec<Lesson>> {
    let raw = metadata.get("lessons_json")?.as_str()?;
    match serde_json::from_str(raw) {
        Ok(lessons) => Some(lessons),
        Err(e) => {
            warn!(error = %e, "Corrupt lesson data in catalog record");
            None
        }
    }
}

fn course_from_metadata(metadata: &Metadata) -> Option<Course> {
    Some(Course {
        title: string_field(metadata, "title")?,
        course_link: string_field(metadata, "course_link"),
        instructor: string_field(metadata, "instructor"),
        lessons: parse_lessons(metadata)?,
    })
}
