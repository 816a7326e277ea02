use callassist_common::Result;
use crate::types::GenerateRequest;
use async_trait::async_trait;

/// Common trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a single-turn prompt
    async fn generate(&self, request: GenerateRequest) -> Result<String>;

    /// Model identifier requests are sent with
    fn model(&self) -> &str;
}
