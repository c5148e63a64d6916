//! Error types for the indexing and retrieval pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Bad chunking or query parameters; never retried
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Request carried no usable credential
    #[error("Unauthorized")]
    Unauthorized,

    /// The source system has no item with this id
    #[error("Source item not found: {0}")]
    SourceNotFound(String),

    /// Upstream content reader error
    #[error("Failed to fetch source '{document_id}': {message}")]
    SourceFetch { document_id: String, message: String },

    /// Embedding service error, with the offending chunk index when known
    #[error("Embedding generation failed{}: {message}", .chunk_index.map(|i| format!(" for chunk {}", i)).unwrap_or_default())]
    Embedding {
        chunk_index: Option<usize>,
        message: String,
    },

    /// Query vector shape does not match the indexed embedding field
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Backend upsert or delete error; remaining chunks of the document are aborted
    #[error("Indexing failed for document '{document_id}'{}: {message}", .chunk_index.map(|i| format!(" at chunk {}", i)).unwrap_or_default())]
    Indexing {
        document_id: String,
        chunk_index: Option<u32>,
        message: String,
    },

    /// Network or TLS failure talking to the search backend
    #[error("Search backend error: {0}")]
    Transport(String),

    /// Text-generation service error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an invalid-configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a source fetch error
    pub fn source_fetch(document_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceFetch {
            document_id: document_id.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error without a chunk index
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            chunk_index: None,
            message: message.into(),
        }
    }

    /// Create an embedding error for a specific chunk
    pub fn embedding_at(chunk_index: usize, message: impl Into<String>) -> Self {
        Self::Embedding {
            chunk_index: Some(chunk_index),
            message: message.into(),
        }
    }

    /// Create an indexing error
    pub fn indexing(document_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Indexing {
            document_id: document_id.into(),
            chunk_index: None,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::InvalidConfiguration(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_configuration", msg.clone())
            }
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            Error::SourceNotFound(id) => (
                StatusCode::NOT_FOUND,
                "source_not_found",
                format!("Source item not found: {}", id),
            ),
            Error::SourceFetch { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "source_fetch_error",
                self.to_string(),
            ),
            Error::Embedding { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "embedding_error",
                self.to_string(),
            ),
            Error::DimensionMismatch { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "dimension_mismatch",
                self.to_string(),
            ),
            Error::Indexing { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "indexing_error",
                self.to_string(),
            ),
            Error::Transport(msg) => (StatusCode::BAD_GATEWAY, "transport_error", msg.clone()),
            Error::Llm(msg) => (StatusCode::SERVICE_UNAVAILABLE, "llm_error", msg.clone()),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
