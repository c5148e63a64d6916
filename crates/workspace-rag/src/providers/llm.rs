//! LLM provider trait for answer generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for text generation
///
/// Implementations:
/// - `GeminiGenerator`: Generative Language API (gemini-2.0-flash)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a prompt, returned unmodified
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
