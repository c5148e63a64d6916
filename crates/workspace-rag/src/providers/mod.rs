//! Provider abstractions for embeddings, generation, search, and content
//!
//! Trait-based seams so the pipeline can be exercised against in-memory
//! fakes in tests and swapped across hosted services in deployment.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod reader;
pub mod search_backend;
pub mod vespa;

pub use embedding::{EmbeddingPool, EmbeddingProvider};
pub use llm::LlmProvider;
pub use reader::{ContentReader, HttpContentReader};
pub use search_backend::SearchBackend;
pub use vespa::VespaClient;
