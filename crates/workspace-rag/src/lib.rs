//! workspace-rag: indexing and retrieval for workspace content
//!
//! Ingests documents, spreadsheets, and calendar feeds as retrievable
//! text, splits them into overlapping chunks, embeds and indexes the
//! chunks in a search backend, and answers questions over the indexed
//! content with source attribution.

pub mod config;
pub mod error;
pub mod generation;
pub mod indexing;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    Chunk, DeleteResult, DocumentType, IndexRecord, IndexResult, SearchHit, Source, SourceDocument,
};
