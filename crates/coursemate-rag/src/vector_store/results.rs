use super::backend::QueryResult;
use super::Metadata;

/// Documents with parallel metadata and distances, or an error message.
///
/// When `error` is set all three lists are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub documents: Vec<String>,
    pub metadata: Vec<Metadata>,
    pub distances: Vec<f32>,
    pub error: Option<String>,
}

impl SearchResults {
    pub fn from_query(result: QueryResult) -> Self {
        Self {
            documents: result.documents,
            metadata: result.metadatas,
            distances: result.distances,
            error: None,
        }
    }

    /// An error result with no documents.
    pub fn empty(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// No documents and no error.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.error.is_none()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_result_is_not_empty() {
        let results = SearchResults::empty("No course found matching 'x'");
        assert!(!results.is_empty());
        assert_eq!(results.len(), 0);
        assert!(results.metadata.is_empty() && results.distances.is_empty());
    }

    #[test]
    fn from_query_keeps_lists_parallel() {
        let results = SearchResults::from_query(QueryResult {
            ids: vec!["a".into(), "b".into()],
            documents: vec!["one".into(), "two".into()],
            metadatas: vec![Metadata::new(), Metadata::new()],
            distances: vec![0.1, 0.4],
        });
        assert_eq!(results.len(), 2);
        assert_eq!(results.metadata.len(), 2);
        assert_eq!(results.distances, vec![0.1, 0.4]);
        assert!(results.error.is_none());
        assert!(SearchResults::default().is_empty());
    }
}
