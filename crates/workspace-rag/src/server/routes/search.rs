//! Search endpoint: retrieve, aggregate, synthesize

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::retrieval::{aggregate, Aggregation};
use crate::server::state::AppState;
use crate::types::query::{SearchRequest, DEFAULT_TOP_K};
use crate::types::response::SearchResponse;

/// POST /search - answer a question over the indexed workspace content
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Response> {
    let query = match request.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => query.to_string(),
        _ => return Err(Error::invalid_configuration("Missing query")),
    };
    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K);

    tracing::info!(%query, top_k, "search request");

    // Optional vector augmentation; the keyword disjunction is always built
    let query_embedding = match state.embedder() {
        Some(embedder) if state.config().embeddings.embed_queries => {
            Some(embedder.embed(&query).await?)
        }
        _ => None,
    };

    let plan = state
        .planner()
        .plan_with_embedding(&query, top_k, query_embedding)?;
    let hits = state.backend().query(&plan).await?;

    let results = match aggregate(&hits) {
        Aggregation::NoResults => {
            tracing::info!(%query, "no results");
            return Ok((
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "No results found" })),
            )
                .into_response());
        }
        Aggregation::Context(results) => results,
    };

    let prompt = PromptBuilder::build_answer_prompt(&query, &results.context);
    let answer = state.llm().generate(&prompt).await?;

    tracing::info!(hits = hits.len(), sources = results.sources.len(), "search answered");

    Ok(Json(SearchResponse {
        answer,
        query,
        vespa_hits: hits,
        sources: results.sources,
    })
    .into_response())
}
