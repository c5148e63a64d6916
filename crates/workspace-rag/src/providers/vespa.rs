//! Vespa adapter: document API upserts and YQL search
//!
//! The only place in the crate that speaks Vespa syntax. The rest of the
//! pipeline hands over structured [`BackendQuery`] values and index
//! records; translation to YQL and the document/v1 payload happens here.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::config::VespaConfig;
use crate::error::{Error, Result};
use crate::types::{BackendQuery, IndexRecord, Predicate, SearchHit};

use super::search_backend::SearchBackend;

/// Vespa client over mutual TLS
pub struct VespaClient {
    client: reqwest::Client,
    endpoint: String,
    namespace: String,
    document_type: String,
}

impl VespaClient {
    /// Create a client from configuration.
    ///
    /// Loads the mTLS identity when a certificate and key are configured;
    /// plain TLS otherwise (local test backends).
    pub fn new(config: &VespaConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs));

        if let Some(pem) = config.client_pem()? {
            let identity = reqwest::Identity::from_pem(&pem)
                .map_err(|e| Error::invalid_configuration(format!("invalid mTLS identity: {}", e)))?;
            builder = builder.identity(identity);
            tracing::info!("Vespa client configured with mTLS identity");
        } else {
            tracing::warn!("Vespa client running without mTLS identity");
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            namespace: config.namespace.clone(),
            document_type: config.document_type.clone(),
        })
    }

    fn document_url(&self, document_id: &str) -> String {
        format!(
            "{}/document/v1/{}/{}/docid/{}",
            self.endpoint, self.namespace, self.document_type, document_id
        )
    }

    fn search_url(&self) -> String {
        format!("{}/search/", self.endpoint)
    }

    /// Record fields as the document API expects them
    fn record_fields(record: &IndexRecord) -> serde_json::Value {
        let mut fields = json!({
            "document_id": record.document_id,
            "parent_id": record.parent_id,
            "chunk_index": record.chunk_index,
            "title": record.title,
            "document_type": record.document_type.as_str(),
            "last_modified": record.last_modified,
            "metadata": record.metadata,
            "content": record.content,
            "text_summary": record.text_summary,
        });
        if let Some(embedding) = &record.embedding {
            fields["embedding"] = json!({ "values": embedding });
        }
        fields
    }
}

/// Render a predicate tree as a YQL condition
fn predicate_to_yql(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Contains { field, term } => {
            format!("{} contains \"{}\"", field.as_str(), escape_term(term))
        }
        Predicate::Or(children) => {
            let parts: Vec<String> = children.iter().map(predicate_to_yql).collect();
            format!("({})", parts.join(" OR "))
        }
    }
}

/// Escape a term for embedding in a quoted YQL string
fn escape_term(term: &str) -> String {
    term.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a full structured query as YQL
fn query_to_yql(query: &BackendQuery) -> Result<String> {
    let mut clauses = Vec::new();

    if let Some(predicate) = &query.predicate {
        clauses.push(predicate_to_yql(predicate));
    }
    if let Some(vector) = &query.vector {
        clauses.push(format!(
            "({{targetHits:{}}}nearestNeighbor(embedding, query_embedding))",
            vector.target_hits
        ));
    }

    if clauses.is_empty() {
        return Err(Error::invalid_configuration(
            "query has neither a predicate nor a vector clause",
        ));
    }

    Ok(format!(
        "select * from sources * where {};",
        clauses.join(" OR ")
    ))
}

#[derive(serde::Deserialize)]
struct VespaSearchResponse {
    root: VespaRoot,
}

#[derive(serde::Deserialize)]
struct VespaRoot {
    #[serde(default)]
    children: Vec<SearchHit>,
}

#[async_trait]
impl SearchBackend for VespaClient {
    async fn upsert(&self, record: &IndexRecord) -> Result<()> {
        let url = self.document_url(&record.document_id);
        let payload = json!({ "fields": Self::record_fields(record) });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::transport(format!("upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(format!(
                "upsert of '{}' failed ({}): {}",
                record.document_id, status, body
            )));
        }

        tracing::debug!(chunk_id = %record.document_id, "upserted record");
        Ok(())
    }

    async fn query(&self, query: &BackendQuery) -> Result<Vec<SearchHit>> {
        let yql = query_to_yql(query)?;

        let mut body = json!({
            "yql": yql,
            "ranking": "default",
            "hits": query.hits,
        });
        if let Some(vector) = &query.vector {
            body["input"] = json!({
                "query_embedding": { "values": vector.vector }
            });
        }

        let response = self
            .client
            .post(self.search_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(format!(
                "search failed ({}): {}",
                status, body
            )));
        }

        let parsed: VespaSearchResponse = response
            .json()
            .await
            .map_err(|e| Error::transport(format!("failed to parse search response: {}", e)))?;

        Ok(parsed.root.children)
    }

    async fn delete(&self, document_id: &str) -> Result<()> {
        let url = self.document_url(document_id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("delete request failed: {}", e)))?;

        // The document API reports success for missing ids
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(format!(
                "delete of '{}' failed ({}): {}",
                document_id, status, body
            )));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/status.html", self.endpoint);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("Vespa health check failed: {}", e);
                Ok(false)
            }
        }
    }

    fn name(&self) -> &str {
        "vespa"
    }
}
