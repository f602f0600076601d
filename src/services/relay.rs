use std::sync::Arc;

use async_trait::async_trait;
use log::error;

use super::gemini_service::GeminiService;
use super::{GenerationRequest, ModelProvider};
use crate::chat::relay_client::PromptRelay;
use crate::config::{Config, GEMINI_MODEL, GEMINI_TEMPERATURE};
use crate::errors::RelayError;
use crate::models::prompt::PromptResult;

/// Server side of a prompt exchange: validates the prompt, injects the
/// system instruction and makes exactly one provider call.
pub struct Relay {
    api_key: Option<String>,
    system_instruction: Arc<str>,
    model: String,
    temperature: f32,
    provider: Arc<dyn ModelProvider>,
}

impl Relay {
    pub fn new(
        api_key: Option<String>,
        system_instruction: impl Into<Arc<str>>,
        provider: Arc<dyn ModelProvider>,
    ) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            system_instruction: system_instruction.into(),
            model: GEMINI_MODEL.to_string(),
            temperature: GEMINI_TEMPERATURE,
            provider,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_key.clone(),
            config.system_instruction.as_str(),
            Arc::new(GeminiService::new(config.gemini_url.clone())),
        )
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn relay(&self, prompt: Option<&str>) -> Result<String, RelayError> {
        let api_key = self.api_key.as_deref().ok_or(RelayError::MissingCredential)?;

        let prompt = prompt
            .filter(|prompt| !prompt.trim().is_empty())
            .ok_or(RelayError::BadRequest)?;

        let request = GenerationRequest {
            model: &self.model,
            system_instruction: &self.system_instruction,
            prompt,
            temperature: self.temperature,
        };

        self.provider
            .generate(api_key, &request)
            .await
            .map_err(|e| {
                error!("Model provider call failed: {}", e);
                RelayError::from(e)
            })
    }
}

#[async_trait]
impl PromptRelay for Relay {
    async fn submit_prompt(&self, prompt: &str) -> PromptResult {
        match self.relay(Some(prompt)).await {
            Ok(text) => PromptResult::success(text),
            Err(RelayError::MissingCredential) => {
                error!("Relay called without a configured GEMINI_KEY");
                RelayError::MissingCredential.into()
            }
            Err(err) => err.into(),
        }
    }
}
