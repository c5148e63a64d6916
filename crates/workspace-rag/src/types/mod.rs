//! Shared data model for the indexing and retrieval pipeline

pub mod document;
pub mod query;
pub mod response;

pub use document::{
    Chunk, ChunkMetadata, DeleteResult, DocumentType, IndexRecord, IndexResult, SourceDocument,
};
pub use query::{BackendQuery, Field, Predicate, VectorQuery, DEFAULT_TOP_K};
pub use response::{HitFields, SearchHit, Source};
