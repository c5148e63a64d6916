//! Source documents, chunks, and the persisted index record schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of characters of content persisted as the record summary
const TEXT_SUMMARY_CHARS: usize = 500;

/// Workspace content variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Word-processing document
    Doc,
    /// Spreadsheet
    Sheet,
    /// Calendar event feed
    Calendar,
}

impl DocumentType {
    /// Stable lowercase name used in index records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Sheet => "sheet",
            Self::Calendar => "calendar",
        }
    }

    /// Parse from the lowercase record value
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "doc" => Some(Self::Doc),
            "sheet" => Some(Self::Sheet),
            "calendar" => Some(Self::Calendar),
            _ => None,
        }
    }

    /// Deep link to the item in its source system.
    ///
    /// Calendars have no per-event link, so every calendar source points at
    /// the calendar itself.
    pub fn viewer_url(&self, document_id: &str) -> String {
        match self {
            Self::Doc => format!("https://docs.google.com/document/d/{}", document_id),
            Self::Sheet => format!("https://docs.google.com/spreadsheets/d/{}", document_id),
            Self::Calendar => "https://calendar.google.com/calendar".to_string(),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of content handed to the pipeline by the content reader.
///
/// Immutable once constructed; the pipeline only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    /// Stable id of the source item
    pub id: String,
    /// Display title
    pub title: String,
    /// Plain text content, normalized by the reader
    pub content: String,
    /// Content variant
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Last modification time reported by the source system
    pub last_modified: DateTime<Utc>,
    /// Open reader-supplied metadata (mime type, row count, event count, ...)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Metadata carried on every chunk, copied from the parent document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    /// Parent document title
    pub title: String,
    /// Parent document variant
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Parent document modification time
    pub last_modified: DateTime<Utc>,
    /// Reader-supplied metadata passed through from the parent
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A contiguous slice of a document's content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Owning document id
    pub document_id: String,
    /// Zero-based position within the document
    pub chunk_index: u32,
    /// Text content
    pub content: String,
    /// Embedding vector, filled in by the embedding stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// Metadata copied from the parent document
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a chunk from a document slice
    pub fn new(doc: &SourceDocument, chunk_index: u32, content: String) -> Self {
        Self {
            document_id: doc.id.clone(),
            chunk_index,
            content,
            embedding: None,
            metadata: ChunkMetadata {
                title: doc.title.clone(),
                doc_type: doc.doc_type,
                last_modified: doc.last_modified,
                extra: doc.metadata.clone(),
            },
        }
    }

    /// Composite record key: `<document_id>_<chunk_index>`.
    ///
    /// Deterministic for a given document and chunk boundaries, which is what
    /// makes re-indexing overwrite instead of duplicate.
    pub fn chunk_id(&self) -> String {
        format!("{}_{}", self.document_id, self.chunk_index)
    }
}

/// The persisted form of a chunk, keyed by its composite chunk id.
///
/// `parent_id` and `chunk_index` are stored explicitly so consumers never
/// have to reconstruct them by splitting `document_id` on underscores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Composite chunk id, also the backend document id
    pub document_id: String,
    /// Owning document id
    pub parent_id: String,
    /// Zero-based chunk position
    pub chunk_index: u32,
    /// Parent document title
    pub title: String,
    /// Parent document variant
    pub document_type: DocumentType,
    /// Parent modification time as epoch millis
    pub last_modified: i64,
    /// Serialized chunk metadata
    pub metadata: String,
    /// Full chunk text
    pub content: String,
    /// First characters of the content
    pub text_summary: String,
    /// Chunk embedding, when computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl IndexRecord {
    /// Build the record persisted for a chunk
    pub fn from_chunk(chunk: &Chunk) -> crate::error::Result<Self> {
        Ok(Self {
            document_id: chunk.chunk_id(),
            parent_id: chunk.document_id.clone(),
            chunk_index: chunk.chunk_index,
            title: chunk.metadata.title.clone(),
            document_type: chunk.metadata.doc_type,
            last_modified: chunk.metadata.last_modified.timestamp_millis(),
            metadata: serde_json::to_string(&chunk.metadata)?,
            content: chunk.content.clone(),
            text_summary: summarize(&chunk.content),
            embedding: chunk.embedding.clone(),
        })
    }
}

/// First [`TEXT_SUMMARY_CHARS`] characters of the content
fn summarize(content: &str) -> String {
    content.chars().take(TEXT_SUMMARY_CHARS).collect()
}

/// Outcome of indexing one document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResult {
    /// Whether all chunks were indexed
    pub success: bool,
    /// The document that was indexed
    pub document_id: String,
    /// Number of chunks written
    pub chunks_count: usize,
}

/// Outcome of deleting one document and its chunks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Whether the delete completed
    pub success: bool,
    /// The document that was deleted
    pub document_id: String,
    /// Number of chunk records removed; zero matches is not an error
    pub chunks_deleted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_doc() -> SourceDocument {
        SourceDocument {
            id: "abc123".to_string(),
            title: "Quarterly plan".to_string(),
            content: "line one\nline two".to_string(),
            doc_type: DocumentType::Doc,
            last_modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            metadata: HashMap::from([(
                "mimeType".to_string(),
                serde_json::json!("application/vnd.google-apps.document"),
            )]),
        }
    }

    #[test]
    fn test_chunk_id_is_composite() {
        let doc = sample_doc();
        let chunk = Chunk::new(&doc, 2, "text".to_string());
        assert_eq!(chunk.chunk_id(), "abc123_2");
    }

    #[test]
    fn test_record_carries_parent_fields() {
        let doc = sample_doc();
        let chunk = Chunk::new(&doc, 0, doc.content.clone());
        let record = IndexRecord::from_chunk(&chunk).unwrap();

        assert_eq!(record.document_id, "abc123_0");
        assert_eq!(record.parent_id, "abc123");
        assert_eq!(record.chunk_index, 0);
        assert_eq!(record.last_modified, doc.last_modified.timestamp_millis());
        assert!(record.embedding.is_none());
    }

    #[test]
    fn test_record_metadata_round_trips() {
        let doc = sample_doc();
        let chunk = Chunk::new(&doc, 0, doc.content.clone());
        let record = IndexRecord::from_chunk(&chunk).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&record.metadata).unwrap();
        assert_eq!(parsed["title"], "Quarterly plan");
        assert_eq!(parsed["type"], "doc");
        assert_eq!(parsed["mimeType"], "application/vnd.google-apps.document");
        assert!(parsed["lastModified"].is_string());
    }

    #[test]
    fn test_text_summary_caps_at_500_chars() {
        let doc = sample_doc();
        let long = "é".repeat(800);
        let chunk = Chunk::new(&doc, 0, long);
        let record = IndexRecord::from_chunk(&chunk).unwrap();

        assert_eq!(record.text_summary.chars().count(), 500);
    }

    #[test]
    fn test_viewer_urls_by_type() {
        assert_eq!(
            DocumentType::Doc.viewer_url("abc"),
            "https://docs.google.com/document/d/abc"
        );
        assert_eq!(
            DocumentType::Sheet.viewer_url("abc"),
            "https://docs.google.com/spreadsheets/d/abc"
        );
        assert_eq!(
            DocumentType::Calendar.viewer_url("abc"),
            "https://calendar.google.com/calendar"
        );
    }
}
