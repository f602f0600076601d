use async_trait::async_trait;

use crate::errors::ProviderError;

pub mod gemini_service;
pub mod relay;

/// Everything the model needs for one prompt.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub system_instruction: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
}

/// Boundary to the hosted model. One call per prompt, no retries.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest<'_>,
    ) -> Result<String, ProviderError>;
}
