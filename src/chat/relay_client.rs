use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};

use crate::models::prompt::{FailureKind, PromptRequest, PromptResult, RelayResponse};

pub const TRANSPORT_FAILURE_MESSAGE: &str = "relay unreachable";

/// The one operation the chat controller needs from a backend.
#[async_trait]
pub trait PromptRelay: Send + Sync {
    async fn submit_prompt(&self, prompt: &str) -> PromptResult;
}

/// Calls a `dsm5-relay` endpoint over HTTP.
#[derive(Clone)]
pub struct HttpRelayClient {
    client: Client,
    url: String,
}

impl HttpRelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, prompt: &str) -> Result<(StatusCode, RelayResponse), reqwest::Error> {
        let response = self
            .client
            .post(&self.url)
            .json(&PromptRequest::new(prompt))
            .send()
            .await?;
        let status = response.status();
        let body: RelayResponse = response.json().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl PromptRelay for HttpRelayClient {
    async fn submit_prompt(&self, prompt: &str) -> PromptResult {
        match self.post(prompt).await {
            Ok((_, RelayResponse::Success { text })) => PromptResult::success(text),
            Ok((status, RelayResponse::Error { message })) => {
                error!("Relay answered {}: {}", status, message);
                let kind = if status == StatusCode::BAD_REQUEST {
                    FailureKind::BadRequest
                } else {
                    FailureKind::Provider
                };
                PromptResult::failure(kind, message)
            }
            Err(e) => {
                error!("Error calling relay at {}: {}", self.url, e);
                PromptResult::failure(FailureKind::Transport, TRANSPORT_FAILURE_MESSAGE)
            }
        }
    }
}
