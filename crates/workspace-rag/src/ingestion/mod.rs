//! Content ingestion: chunking document text for indexing

pub mod chunker;

pub use chunker::{chunk_text, Chunker};
