//! Search backend trait for record upsert, query, and delete

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BackendQuery, IndexRecord, SearchHit};

/// Trait for the chunk-addressed search backend
///
/// Implementations:
/// - `VespaClient`: Vespa document and search APIs over mutual TLS
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Upsert one record under its composite chunk id.
    ///
    /// Writing the same id twice overwrites; the backend never duplicates.
    async fn upsert(&self, record: &IndexRecord) -> Result<()>;

    /// Run a structured query and return hits in backend ranking order
    async fn query(&self, query: &BackendQuery) -> Result<Vec<SearchHit>>;

    /// Delete one record by id; deleting a missing record is not an error
    async fn delete(&self, document_id: &str) -> Result<()>;

    /// Check whether the backend is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Backend name for logging
    fn name(&self) -> &str;
}
