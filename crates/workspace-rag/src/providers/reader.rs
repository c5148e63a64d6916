//! Content reader boundary
//!
//! The reader service owns source-system listing and fetch (documents,
//! spreadsheets, calendars). The pipeline only consumes its payloads;
//! anything non-2xx or malformed surfaces as a fetch failure.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::types::{DocumentType, SourceDocument};

/// Trait for fetching source content on behalf of a caller
#[async_trait]
pub trait ContentReader: Send + Sync {
    /// Fetch one item as retrievable text, using the caller's credential
    async fn fetch(
        &self,
        doc_type: DocumentType,
        document_id: &str,
        credential: &str,
    ) -> Result<SourceDocument>;

    /// Reader name for logging
    fn name(&self) -> &str;
}

/// HTTP content reader client
pub struct HttpContentReader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentReader {
    /// Create a reader client from configuration
    pub fn new(config: &ReaderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn content_url(&self, doc_type: DocumentType, document_id: &str) -> String {
        format!("{}/content/{}/{}", self.base_url, doc_type, document_id)
    }
}

#[async_trait]
impl ContentReader for HttpContentReader {
    async fn fetch(
        &self,
        doc_type: DocumentType,
        document_id: &str,
        credential: &str,
    ) -> Result<SourceDocument> {
        let url = self.content_url(doc_type, document_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|e| Error::source_fetch(document_id, format!("reader unreachable: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::SourceNotFound(document_id.to_string()));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::source_fetch(
                document_id,
                format!("reader returned {}: {}", status, body),
            ));
        }

        response
            .json::<SourceDocument>()
            .await
            .map_err(|e| Error::source_fetch(document_id, format!("malformed payload: {}", e)))
    }

    fn name(&self) -> &str {
        "http-reader"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_url_by_type() {
        let reader = HttpContentReader::new(&ReaderConfig {
            base_url: "http://reader.internal/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(
            reader.content_url(DocumentType::Sheet, "abc123"),
            "http://reader.internal/content/sheet/abc123"
        );
        assert_eq!(
            reader.content_url(DocumentType::Calendar, "primary"),
            "http://reader.internal/content/calendar/primary"
        );
    }
}
