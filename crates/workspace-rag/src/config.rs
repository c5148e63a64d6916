//! Configuration for the indexing and retrieval service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Gemini API configuration (embeddings and generation)
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Search backend (Vespa) configuration
    #[serde(default)]
    pub vespa: VespaConfig,
    /// Content reader configuration
    #[serde(default)]
    pub reader: ReaderConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::invalid_configuration(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::invalid_configuration(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Validate cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::invalid_configuration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.embeddings.concurrency == 0 {
            return Err(Error::invalid_configuration(
                "embedding concurrency must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Embedding pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Compute embeddings for chunks at index time
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Embed queries and add a nearest-neighbor clause to searches
    #[serde(default)]
    pub embed_queries: bool,
    /// Embedding dimensions; must match the backend's embedding field
    pub dimensions: usize,
    /// Maximum concurrent embedding requests
    pub concurrency: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            embed_queries: false,
            dimensions: 768,
            concurrency: 8,
        }
    }
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL
    pub api_base: String,
    /// API key; falls back to the GEMINI_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            embed_model: "embedding-001".to_string(),
            generate_model: "gemini-2.0-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

impl GeminiConfig {
    /// Resolve the API key from config or environment
    pub fn resolve_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::invalid_configuration(
                    "Gemini API key missing: set gemini.api_key or GEMINI_API_KEY",
                )
            })
    }
}

/// Search backend (Vespa) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VespaConfig {
    /// Base endpoint URL
    pub endpoint: String,
    /// Document namespace
    pub namespace: String,
    /// Document type
    pub document_type: String,
    /// Client certificate PEM path for mutual TLS
    #[serde(default)]
    pub cert_path: Option<PathBuf>,
    /// Client key PEM path for mutual TLS
    #[serde(default)]
    pub key_path: Option<PathBuf>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VespaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8100".to_string(),
            namespace: "msmarco".to_string(),
            document_type: "passage".to_string(),
            cert_path: None,
            key_path: None,
            timeout_secs: 30,
        }
    }
}

impl VespaConfig {
    /// Load the mTLS client identity PEM, if configured.
    ///
    /// Environment variables VESPA_CERT and VESPA_KEY take precedence over
    /// file paths and may carry literal `\n` escapes.
    pub fn client_pem(&self) -> Result<Option<Vec<u8>>> {
        let cert = match std::env::var("VESPA_CERT").ok().filter(|v| !v.is_empty()) {
            Some(pem) => Some(pem.replace("\\n", "\n")),
            None => match &self.cert_path {
                Some(path) => Some(std::fs::read_to_string(path)?),
                None => None,
            },
        };
        let key = match std::env::var("VESPA_KEY").ok().filter(|v| !v.is_empty()) {
            Some(pem) => Some(pem.replace("\\n", "\n")),
            None => match &self.key_path {
                Some(path) => Some(std::fs::read_to_string(path)?),
                None => None,
            },
        };

        match (cert, key) {
            (Some(cert), Some(key)) => Ok(Some(format!("{}\n{}", cert, key).into_bytes())),
            (None, None) => Ok(None),
            _ => Err(Error::invalid_configuration(
                "mutual TLS requires both a certificate and a key",
            )),
        }
    }
}

/// Content reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Base URL of the content reader service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_secs: 30,
        }
    }
}

fn default_true() -> bool {
    true
}
