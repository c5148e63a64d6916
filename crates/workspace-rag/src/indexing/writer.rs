//! Index writer: document → chunks → records → backend upserts

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ingestion::Chunker;
use crate::providers::{EmbeddingPool, SearchBackend};
use crate::types::{
    BackendQuery, Chunk, DeleteResult, Field, IndexRecord, IndexResult, Predicate, SourceDocument,
};

/// Hit limit when discovering chunk records for deletion
const DELETE_DISCOVERY_HITS: usize = 400;

/// Writes documents into the search backend as per-chunk records.
///
/// Chunk upserts run strictly in ascending chunk order: an interruption
/// after chunk `k` leaves chunks `0..=k` durably indexed and the rest
/// absent. Re-running the whole document overwrites record by record, so
/// callers recover from a partial write by retrying the document.
pub struct IndexWriter {
    backend: Arc<dyn SearchBackend>,
    embedder: Option<EmbeddingPool>,
    chunker: Chunker,
}

impl IndexWriter {
    /// Create a writer.
    ///
    /// With `embedder` set, every chunk is embedded before upsert;
    /// without it, records are written keyword-searchable only.
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        embedder: Option<EmbeddingPool>,
        chunker: Chunker,
    ) -> Self {
        Self {
            backend,
            embedder,
            chunker,
        }
    }

    /// Chunk, embed, and upsert one document.
    ///
    /// A failing upsert aborts the remaining chunks and surfaces the
    /// failing chunk index; already-written chunks stay committed.
    pub async fn index_document(&self, doc: &SourceDocument) -> Result<IndexResult> {
        let texts = self.chunker.chunk(&doc.content)?;
        tracing::info!(
            document_id = %doc.id,
            doc_type = %doc.doc_type,
            chunks = texts.len(),
            "indexing document"
        );

        let mut chunks: Vec<Chunk> = texts
            .into_iter()
            .enumerate()
            .map(|(i, content)| Chunk::new(doc, i as u32, content))
            .collect();

        if let Some(embedder) = &self.embedder {
            let contents: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
            let embeddings = embedder.embed_many(&contents).await?;
            for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
                chunk.embedding = Some(embedding);
            }
        }

        for chunk in &chunks {
            let record = IndexRecord::from_chunk(chunk)?;
            self.backend.upsert(&record).await.map_err(|e| Error::Indexing {
                document_id: doc.id.clone(),
                chunk_index: Some(chunk.chunk_index),
                message: e.to_string(),
            })?;
        }

        tracing::info!(document_id = %doc.id, chunks = chunks.len(), "document indexed");

        Ok(IndexResult {
            success: true,
            document_id: doc.id.clone(),
            chunks_count: chunks.len(),
        })
    }

    /// Remove a document's primary record and every chunk record carrying
    /// its id. Zero matches is success, not an error.
    pub async fn delete_document(&self, document_id: &str) -> Result<DeleteResult> {
        self.backend
            .delete(document_id)
            .await
            .map_err(|e| Error::indexing(document_id, e.to_string()))?;

        let discovery = BackendQuery {
            predicate: Some(Predicate::contains(Field::DocumentId, document_id)),
            vector: None,
            hits: DELETE_DISCOVERY_HITS,
        };
        let hits = self.backend.query(&discovery).await?;

        let mut chunks_deleted = 0;
        for hit in &hits {
            self.backend
                .delete(&hit.fields.document_id)
                .await
                .map_err(|e| Error::indexing(document_id, e.to_string()))?;
            chunks_deleted += 1;
        }

        tracing::info!(document_id, chunks_deleted, "document deleted");

        Ok(DeleteResult {
            success: true,
            document_id: document_id.to_string(),
            chunks_deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use std::collections::HashMap;

    use crate::providers::EmbeddingProvider;
    use crate::types::{DocumentType, SearchHit};

    /// In-memory backend recording upserts, with an optional poisoned id
    #[derive(Default)]
    struct MemoryBackend {
        records: Mutex<Vec<IndexRecord>>,
        fail_on: Option<String>,
        query_hits: Mutex<Vec<SearchHit>>,
        deletes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchBackend for MemoryBackend {
        async fn upsert(&self, record: &IndexRecord) -> Result<()> {
            if self.fail_on.as_deref() == Some(record.document_id.as_str()) {
                return Err(Error::transport("backend unavailable"));
            }
            self.records.lock().push(record.clone());
            Ok(())
        }

        async fn query(&self, _query: &BackendQuery) -> Result<Vec<SearchHit>> {
            Ok(self.query_hits.lock().clone())
        }

        async fn delete(&self, document_id: &str) -> Result<()> {
            self.deletes.lock().push(document_id.to_string());
            Ok(())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    struct ConstantEmbedder;

    #[async_trait]
    impl EmbeddingProvider for ConstantEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.5; 4])
        }

        fn dimensions(&self) -> usize {
            4
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    fn sample_doc(content: &str) -> SourceDocument {
        SourceDocument {
            id: "abc123".to_string(),
            title: "Quarterly plan".to_string(),
            content: content.to_string(),
            doc_type: DocumentType::Doc,
            last_modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            metadata: HashMap::new(),
        }
    }

    fn writer(backend: Arc<MemoryBackend>, embed: bool) -> IndexWriter {
        let embedder = embed.then(|| EmbeddingPool::new(Arc::new(ConstantEmbedder), 2));
        IndexWriter::new(backend, embedder, Chunker::new(10, 2).unwrap())
    }

    #[tokio::test]
    async fn test_index_document_writes_one_record_per_chunk() {
        let backend = Arc::new(MemoryBackend::default());
        let result = writer(Arc::clone(&backend), true)
            .index_document(&sample_doc("abcdefghijklmnopqrstuvwx"))
            .await
            .unwrap();

        let records = backend.records.lock();
        assert!(result.success);
        assert_eq!(result.chunks_count, records.len());
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.document_id, format!("abc123_{}", i));
            assert_eq!(record.parent_id, "abc123");
            assert_eq!(record.embedding.as_deref(), Some(&[0.5f32; 4][..]));
        }
    }

    #[tokio::test]
    async fn test_reindexing_reuses_chunk_ids() {
        let backend = Arc::new(MemoryBackend::default());
        let writer = writer(Arc::clone(&backend), false);
        let doc = sample_doc("abcdefghijklmnopqrstuvwx");

        let first = writer.index_document(&doc).await.unwrap();
        let second = writer.index_document(&doc).await.unwrap();
        assert_eq!(first.chunks_count, second.chunks_count);

        let records = backend.records.lock();
        let unique: std::collections::HashSet<&str> =
            records.iter().map(|r| r.document_id.as_str()).collect();
        // Same ids the second time around: upserts overwrite, never duplicate
        assert_eq!(unique.len(), first.chunks_count);
    }

    #[tokio::test]
    async fn test_failed_upsert_aborts_remaining_chunks() {
        let backend = Arc::new(MemoryBackend {
            fail_on: Some("abc123_1".to_string()),
            ..Default::default()
        });
        let err = writer(Arc::clone(&backend), false)
            .index_document(&sample_doc("abcdefghijklmnopqrstuvwx"))
            .await
            .unwrap_err();

        match err {
            Error::Indexing {
                document_id,
                chunk_index,
                ..
            } => {
                assert_eq!(document_id, "abc123");
                assert_eq!(chunk_index, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Chunk 0 is durably present; chunks 1.. were never written
        let records = backend.records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].document_id, "abc123_0");
    }

    #[tokio::test]
    async fn test_records_skip_embeddings_when_disabled() {
        let backend = Arc::new(MemoryBackend::default());
        writer(Arc::clone(&backend), false)
            .index_document(&sample_doc("abcdefghijklmnop"))
            .await
            .unwrap();

        assert!(backend.records.lock().iter().all(|r| r.embedding.is_none()));
    }

    #[tokio::test]
    async fn test_delete_document_removes_discovered_chunks() {
        let hit = |id: &str| SearchHit {
            id: format!("index:content/0/{}", id),
            relevance: Some(0.0),
            fields: crate::types::HitFields {
                document_id: id.to_string(),
                ..Default::default()
            },
        };
        let backend = Arc::new(MemoryBackend::default());
        *backend.query_hits.lock() = vec![hit("abc123_0"), hit("abc123_1")];

        let result = writer(Arc::clone(&backend), false)
            .delete_document("abc123")
            .await
            .unwrap();

        assert_eq!(result.chunks_deleted, 2);
        let deletes = backend.deletes.lock();
        assert_eq!(*deletes, vec!["abc123", "abc123_0", "abc123_1"]);
    }

    #[tokio::test]
    async fn test_delete_document_tolerates_zero_matches() {
        let backend = Arc::new(MemoryBackend::default());
        let result = writer(Arc::clone(&backend), false)
            .delete_document("missing")
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.chunks_deleted, 0);
    }
}
