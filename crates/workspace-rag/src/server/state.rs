//! Application state for the indexing and retrieval server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::indexing::IndexWriter;
use crate::ingestion::Chunker;
use crate::providers::{
    gemini::{GeminiEmbedder, GeminiGenerator},
    ContentReader, EmbeddingPool, HttpContentReader, LlmProvider, SearchBackend, VespaClient,
};
use crate::retrieval::QueryPlanner;

/// Shared application state.
///
/// Every client is constructed exactly once here and handed by reference
/// to the components that need it; nothing in the crate reaches for a
/// process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Search backend client
    backend: Arc<dyn SearchBackend>,
    /// Embedding fan-out pool, absent when embeddings are disabled
    embedder: Option<EmbeddingPool>,
    /// Answer generator
    llm: Arc<dyn LlmProvider>,
    /// Content reader client
    reader: Arc<dyn ContentReader>,
    /// Write-path orchestrator
    writer: IndexWriter,
    /// Read-path planner
    planner: QueryPlanner,
}

impl AppState {
    /// Construct all clients and wire the pipeline
    pub fn new(config: RagConfig) -> Result<Self> {
        config.validate()?;

        let backend: Arc<dyn SearchBackend> = Arc::new(VespaClient::new(&config.vespa)?);
        tracing::info!(endpoint = %config.vespa.endpoint, "search backend client initialized");

        let embedder = if config.embeddings.enabled || config.embeddings.embed_queries {
            let provider = Arc::new(GeminiEmbedder::new(
                &config.gemini,
                config.embeddings.dimensions,
            )?);
            tracing::info!(
                model = %config.gemini.embed_model,
                concurrency = config.embeddings.concurrency,
                "embedding provider initialized"
            );
            Some(EmbeddingPool::new(provider, config.embeddings.concurrency))
        } else {
            tracing::info!("embeddings disabled, indexing keyword-searchable records only");
            None
        };

        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiGenerator::new(&config.gemini)?);
        tracing::info!(model = %llm.model(), "generation provider initialized");

        let reader: Arc<dyn ContentReader> = Arc::new(HttpContentReader::new(&config.reader)?);

        let chunker = Chunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap)?;
        let index_embedder = config.embeddings.enabled.then(|| embedder.clone()).flatten();
        let writer = IndexWriter::new(Arc::clone(&backend), index_embedder, chunker);

        let planner = QueryPlanner::new(config.embeddings.dimensions);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                embedder,
                llm,
                reader,
                writer,
                planner,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the search backend client
    pub fn backend(&self) -> &Arc<dyn SearchBackend> {
        &self.inner.backend
    }

    /// Get the embedding pool, when configured
    pub fn embedder(&self) -> Option<&EmbeddingPool> {
        self.inner.embedder.as_ref()
    }

    /// Get the answer generator
    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    /// Get the content reader
    pub fn reader(&self) -> &Arc<dyn ContentReader> {
        &self.inner.reader
    }

    /// Get the index writer
    pub fn writer(&self) -> &IndexWriter {
        &self.inner.writer
    }

    /// Get the query planner
    pub fn planner(&self) -> &QueryPlanner {
        &self.inner.planner
    }
}
