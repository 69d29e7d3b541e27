//! Vector search settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Similarity search and course catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default number of chunks returned per search (valid range: 1-100).
    pub max_results: u32,
    /// Width of the hashed embedding vectors (valid range: 16-4096).
    pub embedding_dimensions: u32,
    /// Course-name resolution rejects the nearest title when its cosine
    /// distance is at or above this value (valid range: 0.0-2.0).
    pub resolve_max_distance: f64,
    /// JSON course catalog ingested at startup.
    pub catalog_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            embedding_dimensions: 384,
            resolve_max_distance: 1.0,
            catalog_path: None,
        }
    }
}
