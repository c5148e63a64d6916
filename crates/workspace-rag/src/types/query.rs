//! Request types and the backend-agnostic query model

use serde::Deserialize;

/// Default number of hits requested from the backend
pub const DEFAULT_TOP_K: usize = 10;

/// Searchable fields of an index record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Record title
    Title,
    /// Content summary
    TextSummary,
    /// Full chunk content
    Content,
    /// Composite chunk id
    DocumentId,
}

impl Field {
    /// Backend field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TextSummary => "text_summary",
            Self::Content => "content",
            Self::DocumentId => "document_id",
        }
    }
}

/// A predicate tree over index record fields.
///
/// Deliberately small: the keyword planner only ever produces disjunctions
/// of per-field substring matches. Translation to backend syntax is the
/// adapter's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field contains the given term
    Contains { field: Field, term: String },
    /// Any of the sub-predicates matches
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Convenience constructor for a contains predicate
    pub fn contains(field: Field, term: impl Into<String>) -> Self {
        Self::Contains {
            field,
            term: term.into(),
        }
    }
}

/// Nearest-neighbor clause over the embedding field
#[derive(Debug, Clone, PartialEq)]
pub struct VectorQuery {
    /// Query embedding
    pub vector: Vec<f32>,
    /// Number of neighbors to target
    pub target_hits: usize,
}

/// A structured backend query: predicate tree, optional vector clause, and
/// a hit limit. Not yet backend-specific syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendQuery {
    /// Keyword predicate, if any
    pub predicate: Option<Predicate>,
    /// Nearest-neighbor clause, if any
    pub vector: Option<VectorQuery>,
    /// Maximum number of hits requested
    pub hits: usize,
}

/// Request body for POST /index
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRequest {
    /// Content variant to index
    #[serde(default)]
    pub document_type: Option<crate::types::document::DocumentType>,
    /// Source item id
    #[serde(default)]
    pub document_id: Option<String>,
}

/// Request body for POST /search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Natural-language question
    #[serde(default)]
    pub query: Option<String>,
    /// Number of hits to request
    #[serde(default, rename = "topK")]
    pub top_k: Option<usize>,
}
