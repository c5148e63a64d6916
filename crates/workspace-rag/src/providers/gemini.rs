//! Gemini providers for embeddings and answer generation
//!
//! Both talk to the Generative Language REST API with an API key. The
//! embedder targets `embedding-001` (768 dimensions) and the generator
//! targets `gemini-2.0-flash` by default.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// Gemini embedding provider
pub struct GeminiEmbedder {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl GeminiEmbedder {
    /// Create a new embedder
    pub fn new(config: &GeminiConfig, dimensions: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key()?,
            model: config.embed_model.clone(),
            dimensions,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:embedContent?key={}",
            self.api_base, self.model, self.api_key
        )
    }
}

#[derive(serde::Serialize)]
struct EmbedRequest {
    content: ContentParts,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

#[derive(serde::Serialize)]
struct ContentParts {
    parts: Vec<TextPart>,
}

#[derive(serde::Serialize)]
struct TextPart {
    text: String,
}

#[derive(serde::Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(serde::Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            content: ContentParts {
                parts: vec![TextPart {
                    text: text.to_string(),
                }],
            },
            task_type: "RETRIEVAL_DOCUMENT",
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "Gemini embedding failed ({}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse Gemini response: {}", e)))?;

        Ok(embed_response.embedding.values)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Gemini answer generator
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiGenerator {
    /// Create a new generator
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key()?,
            model: config.generate_model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        )
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<GenerateContent>,
}

#[derive(serde::Serialize)]
struct GenerateContent {
    role: &'static str,
    parts: Vec<TextPart>,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl LlmProvider for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![GenerateContent {
                role: "user",
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Gemini generation failed ({}): {}",
                status, body
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse Gemini response: {}", e)))?;

        let text: String = generate_response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::llm("Gemini returned no candidates"));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
