//! Vector store adapter.
//!
//! Hides the similarity engine behind search, course-name resolution and
//! filter building. Two collections are kept: a course catalog (one record
//! per course, keyed by title) and the searchable course content.

mod backend;
mod catalog;
mod embedder;
mod filter;
mod memory;
mod results;


pub use backend::{Collection, GetResult, QueryResult, VectorBackend};
pub(crate) use catalog::parse_lessons;
pub use embedder::{cosine_distance, Embedder, HashingEmbedder};
pub use filter::{build_filter, Filter};
pub use memory::{MemoryBackend, MemoryCollection};
pub use results::SearchResults;

use std::sync::Arc;

use coursemate_common::CoursemateError;
use tracing::{debug, warn};

/// Metadata attached to a stored record.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

pub const CATALOG_COLLECTION: &str = "course_catalog";
pub const CONTENT_COLLECTION: &str = "course_content";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("collection not found: {0}")]
    CollectionNotFound(String),
}

impl From<StoreError> for CoursemateError {
    fn from(err: StoreError) -> Self {
        CoursemateError::Store(err.to_string())
    }
}

pub struct VectorStore {
    backend: Arc<dyn VectorBackend>,
    max_results: usize,
    /// Course resolution rejects matches at or beyond this distance.
    resolve_max_distance: f32,
}

impl VectorStore {
    pub fn new(backend: Arc<dyn VectorBackend>, max_results: usize, resolve_max_distance: f32) -> Self {
        Self {
            backend,
            max_results,
            resolve_max_distance,
        }
    }

    /// Store over a fresh `MemoryBackend` with hashed embeddings.
    pub fn in_memory(dimensions: usize, max_results: usize, resolve_max_distance: f32) -> Self {
        Self::new(
            Arc::new(MemoryBackend::with_dimensions(dimensions)),
            max_results,
            resolve_max_distance,
        )
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Search course content, optionally scoped to a course and lesson.
    ///
    /// An unresolvable course name yields an error result instead of an
    /// unfiltered search. Engine failures are wrapped, never propagated.
    pub async fn search(
        &self,
        query: &str,
        course_name: Option<&str>,
        lesson_number: Option<u32>,
        limit: Option<usize>,
    ) -> SearchResults {
        let course_title = match course_name {
            Some(name) => match self.resolve_course_name(name).await {
                Some(title) => Some(title),
                None => return SearchResults::empty(format!("No course found matching '{name}'")),
            },
            None => None,
        };

        let filter = build_filter(course_title.as_deref(), lesson_number);
        let limit = limit.unwrap_or(self.max_results);

        match self.query_content(query, limit, filter.as_ref()).await {
            Ok(result) => {
                debug!(hits = result.documents.len(), filter = ?filter.as_ref().map(Filter::to_json), "Content search");
                SearchResults::from_query(result)
            }
            Err(e) => {
                warn!(error = %e, "Content search failed");
                SearchResults::empty(format!("Search error: {e}"))
            }
        }
    }

    /// Canonical title of the course closest to `course_name`, if any.
    pub async fn resolve_course_name(&self, course_name: &str) -> Option<String> {
        let result = match self.nearest_course(course_name).await {
            Ok(result) => result,
            Err(e) => {
                warn!(course = %course_name, error = %e, "Course resolution failed");
                return None;
            }
        };

        let distance = *result.distances.first()?;
        if distance >= self.resolve_max_distance {
            debug!(course = %course_name, distance, "No course close enough");
            return None;
        }

        let title = result
            .metadatas
            .first()
            .and_then(|meta| meta.get("title"))
            .and_then(|title| title.as_str())
            .map(str::to_string);
        if let Some(title) = &title {
            debug!(course = %course_name, resolved = %title, distance, "Resolved course name");
        }
        title
    }

    async fn nearest_course(&self, course_name: &str) -> Result<QueryResult, StoreError> {
        self.catalog().await?.query(course_name, 1, None).await
    }

    async fn query_content(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&Filter>,
    ) -> Result<QueryResult, StoreError> {
        self.content().await?.query(query, limit, filter).await
    }

    async fn catalog(&self) -> Result<Arc<dyn Collection>, StoreError> {
        self.backend.get_or_create_collection(CATALOG_COLLECTION).await
    }

    async fn content(&self) -> Result<Arc<dyn Collection>, StoreError> {
        self.backend.get_or_create_collection(CONTENT_COLLECTION).await
    }
}
