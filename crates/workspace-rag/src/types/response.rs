//! Search hits, attribution sources, and response bodies

use serde::{Deserialize, Serialize};

use super::document::DocumentType;

/// Fields of a hit returned by the search backend.
///
/// Mirrors the index record schema; everything except the record key is
/// optional so that hits written by older schema versions still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitFields {
    /// Composite chunk id
    pub document_id: String,
    /// Owning document id, absent on records written before the field existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Zero-based chunk position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<u32>,
    /// Record title
    #[serde(default)]
    pub title: String,
    /// Content variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    /// Epoch millis of the parent's last modification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
    /// Serialized chunk metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    /// Full chunk text
    #[serde(default)]
    pub content: String,
    /// Content summary
    #[serde(default)]
    pub text_summary: String,
}

/// A ranked record returned by the backend.
///
/// Hit order is the backend's ranking; `relevance` is a backend-local
/// signal and is not comparable across queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Backend-internal hit id
    #[serde(default)]
    pub id: String,
    /// Backend relevance signal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    /// Record fields
    pub fields: HitFields,
}

/// An attribution entry pointing back at the originating item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Originating document id
    pub id: String,
    /// Document title
    pub title: String,
    /// Content variant
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// First line of the matched chunk
    pub snippet: String,
    /// Deep link into the source system
    pub url: String,
}

/// Response body for POST /search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Generated answer
    pub answer: String,
    /// The question as asked
    pub query: String,
    /// Raw backend hits, in backend order
    #[serde(rename = "vespaHits")]
    pub vespa_hits: Vec<SearchHit>,
    /// De-duplicated attribution list
    pub sources: Vec<Source>,
}

/// Response body for POST /index
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    /// Whether indexing completed
    pub success: bool,
    /// Indexing outcome
    pub result: super::document::IndexResult,
}
