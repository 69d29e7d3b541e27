//! In-process similarity backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use ndarray::{Array1, Axis};
use tracing::{debug, warn};

use super::backend::{Collection, GetResult, QueryResult, VectorBackend};
use super::embedder::{rank_by_distance, Embedder, HashingEmbedder};
use super::{Filter, Metadata, StoreError};

struct Record {
    id: String,
    document: String,
    metadata: Metadata,
    embedding: Array1<f32>,
}

/// Collections held in memory, embedded with a shared `Embedder`.
pub struct MemoryBackend {
    embedder: Arc<dyn Embedder>,
    collections: RwLock<HashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryBackend {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Backend using a `HashingEmbedder` of the given width.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self::new(Arc::new(HashingEmbedder::new(dimensions)))
    }
}

#[async_trait]
impl VectorBackend for MemoryBackend {
    async fn get_or_create_collection(
        &self,
        name: &str,
    ) -> Result<Arc<dyn Collection>, StoreError> {
        let mut collections = self.collections.write().map_err(lock_error)?;
        let collection: Arc<dyn Collection> = collections
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(collection = %name, "Creating collection");
                Arc::new(MemoryCollection::new(name, Arc::clone(&self.embedder)))
            })
            .clone();
        Ok(collection)
    }

    async fn delete_collection(&self, name: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(lock_error)?;
        match collections.remove(name) {
            Some(_) => Ok(()),
            None => Err(StoreError::CollectionNotFound(name.to_string())),
        }
    }
}

pub struct MemoryCollection {
    name: String,
    embedder: Arc<dyn Embedder>,
    records: RwLock<Vec<Record>>,
}

impl MemoryCollection {
    fn new(name: &str, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            name: name.to_string(),
            embedder,
            records: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Collection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn add(
        &self,
        documents: Vec<String>,
        metadatas: Vec<Metadata>,
        ids: Vec<String>,
    ) -> Result<(), StoreError> {
        if documents.len() != metadatas.len() || documents.len() != ids.len() {
            return Err(StoreError::Backend(format!(
                "mismatched add lengths: {} documents, {} metadatas, {} ids",
                documents.len(),
                metadatas.len(),
                ids.len()
            )));
        }

        let mut records = self.records.write().map_err(lock_error)?;
        for ((document, metadata), id) in documents.into_iter().zip(metadatas).zip(ids) {
            if records.iter().any(|r| r.id == id) {
                warn!(collection = %self.name, id = %id, "Skipping duplicate id");
                continue;
            }
            let embedding = self.embedder.embed(&document);
            records.push(Record {
                id,
                document,
                metadata,
                embedding,
            });
        }
        Ok(())
    }

    async fn query(
        &self,
        text: &str,
        n_results: usize,
        filter: Option<&Filter>,
    ) -> Result<QueryResult, StoreError> {
        let query = self.embedder.embed(text);
        let records = self.records.read().map_err(lock_error)?;

        let candidates: Vec<&Record> = records
            .iter()
            .filter(|r| filter.map_or(true, |f| f.matches(&r.metadata)))
            .collect();
        if candidates.is_empty() {
            return Ok(QueryResult::default());
        }

        let rows: Vec<_> = candidates.iter().map(|r| r.embedding.view()).collect();
        let matrix = ndarray::stack(Axis(0), &rows)
            .map_err(|e| StoreError::Backend(format!("embedding shape mismatch: {e}")))?;
        let mut ranked = rank_by_distance(query.view(), matrix.view());
        ranked.truncate(n_results);
        let scored = ranked.into_iter().map(|(row, distance)| (candidates[row], distance));

        let mut result = QueryResult::default();
        for (record, distance) in scored {
            result.ids.push(record.id.clone());
            result.documents.push(record.document.clone());
            result.metadatas.push(record.metadata.clone());
            result.distances.push(distance);
        }
        Ok(result)
    }

    async fn get(&self, ids: Option<&[String]>) -> Result<GetResult, StoreError> {
        let records = self.records.read().map_err(lock_error)?;
        let selected: Vec<&Record> = match ids {
            Some(ids) => ids
                .iter()
                .filter_map(|id| records.iter().find(|r| &r.id == id))
                .collect(),
            None => records.iter().collect(),
        };

        let mut result = GetResult::default();
        for record in selected {
            result.ids.push(record.id.clone());
            result.documents.push(record.document.clone());
            result.metadatas.push(record.metadata.clone());
        }
        Ok(result)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(lock_error)?.len())
    }
}

fn lock_error<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Backend("collection lock poisoned".to_string())
}
