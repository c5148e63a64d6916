//! Embedding provider trait and the bounded fan-out pool

use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::error::{Error, Result};

/// Trait for generating text embeddings
///
/// Implementations:
/// - `GeminiEmbedder`: Generative Language API (embedding-001)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimensions (e.g. 768 for embedding-001)
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Fan-out embedding over a provider with a fixed concurrency cap.
///
/// Requests for all texts are issued under a semaphore so a large document
/// cannot flood the embedding service; results come back in input order no
/// matter which requests complete first. A failure surfaces the lowest
/// failing input index.
#[derive(Clone)]
pub struct EmbeddingPool {
    provider: Arc<dyn EmbeddingProvider>,
    concurrency: usize,
}

impl EmbeddingPool {
    /// Create a pool over a provider
    pub fn new(provider: Arc<dyn EmbeddingProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// Embed a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.provider.embed(text).await
    }

    /// Embed many texts concurrently, preserving input order
    pub async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let futures: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let provider = Arc::clone(&self.provider);
                let semaphore = Arc::clone(&semaphore);
                let text = text.clone();

                async move {
                    let _permit = semaphore.acquire().await.unwrap();
                    provider.embed(&text).await.map_err(|e| match e {
                        Error::Embedding { message, .. } => Error::Embedding {
                            chunk_index: Some(index),
                            message,
                        },
                        other => Error::embedding_at(index, other.to_string()),
                    })
                }
            })
            .collect();

        // Each future owns its output slot, so ordering is positional
        join_all(futures).await.into_iter().collect()
    }
}
