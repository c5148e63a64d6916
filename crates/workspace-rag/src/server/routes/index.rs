//! Indexing endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::query::IndexRequest;
use crate::types::response::IndexResponse;
use crate::types::DeleteResult;

/// POST /index - fetch a source item and index it chunk by chunk
pub async fn index_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<IndexRequest>,
) -> Result<Json<IndexResponse>> {
    let credential = bearer_token(&headers).ok_or(Error::Unauthorized)?;

    let (doc_type, document_id) = match (request.document_type, request.document_id) {
        (Some(doc_type), Some(id)) if !id.is_empty() => (doc_type, id),
        _ => {
            return Err(Error::invalid_configuration(
                "Missing required parameters: documentType and documentId",
            ))
        }
    };

    tracing::info!(%doc_type, %document_id, "index request");

    let doc = state
        .reader()
        .fetch(doc_type, &document_id, credential)
        .await?;
    let result = state.writer().index_document(&doc).await?;

    Ok(Json(IndexResponse {
        success: true,
        result,
    }))
}

/// DELETE /index/:id - remove a document and all of its chunk records
pub async fn delete_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
) -> Result<Json<DeleteResult>> {
    bearer_token(&headers).ok_or(Error::Unauthorized)?;

    tracing::info!(%document_id, "delete request");

    let result = state.writer().delete_document(&document_id).await?;
    Ok(Json(result))
}

/// Extract the bearer credential from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}
