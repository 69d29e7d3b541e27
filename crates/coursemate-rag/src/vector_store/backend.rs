//! Abstract similarity-search engine.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Filter, Metadata, StoreError};

/// Nearest matches for one query text, closest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub metadatas: Vec<Metadata>,
    pub distances: Vec<f32>,
}

/// Records fetched by id, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetResult {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub metadatas: Vec<Metadata>,
}

/// A named set of documents with metadata.
#[async_trait]
pub trait Collection: Send + Sync {
    fn name(&self) -> &str;

    /// Insert records. The three lists must have equal length.
    async fn add(
        &self,
        documents: Vec<String>,
        metadatas: Vec<Metadata>,
        ids: Vec<String>,
    ) -> Result<(), StoreError>;

    async fn query(
        &self,
        text: &str,
        n_results: usize,
        filter: Option<&Filter>,
    ) -> Result<QueryResult, StoreError>;

    /// Fetch records by id; `None` returns every record.
    async fn get(&self, ids: Option<&[String]>) -> Result<GetResult, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

#[async_trait]
pub trait VectorBackend: Send + Sync {
    async fn get_or_create_collection(&self, name: &str)
        -> Result<Arc<dyn Collection>, StoreError>;

    async fn delete_collection(&self, name: &str) -> Result<(), StoreError>;
}
