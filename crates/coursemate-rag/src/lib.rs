//! Retrieval side of coursemate.
//!
//! Provides:
//! - Course, lesson and chunk models
//! - The vector store adapter over a pluggable similarity backend
//! - The tool registry with the content search and outline tools
//! - `RagSystem`, which wires the store, tools, generator and sessions together

pub mod models;
pub mod system;
pub mod tools;
pub mod vector_store;

pub use models::{CatalogEntry, Course, CourseChunk, Lesson};
pub use system::{CatalogSummary, CourseAnalytics, QueryOutcome, RagSystem};
pub use tools::{ContentSearchTool, OutlineTool, Source, Tool, ToolRegistry};
pub use vector_store::{
    build_filter, Filter, MemoryBackend, SearchResults, StoreError, VectorBackend, VectorStore,
};
