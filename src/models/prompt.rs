use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a relay call. `prompt` is kept loose so that a missing or
/// non-string field reaches the relay as a bad request instead of failing
/// extraction.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(Value::String(prompt.into())),
        }
    }

    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt.as_ref().and_then(Value::as_str)
    }
}

/// Wire form of the relay's answer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RelayResponse {
    Success { text: String },
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    BadRequest,
    Configuration,
    Provider,
    Transport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptResult {
    Success { text: String },
    Failure { kind: FailureKind, message: String },
}

impl PromptResult {
    pub fn success(text: impl Into<String>) -> Self {
        PromptResult::Success { text: text.into() }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        PromptResult::Failure {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn relay_response_uses_status_tag() {
        let ok = serde_json::to_value(RelayResponse::Success {
            text: "resposta".to_string(),
        })
        .unwrap();
        assert_eq!(ok, json!({ "status": "success", "text": "resposta" }));

        let err: RelayResponse =
            serde_json::from_value(json!({ "status": "error", "message": "falhou" })).unwrap();
        assert_eq!(
            err,
            RelayResponse::Error {
                message: "falhou".to_string()
            }
        );
    }

    #[test]
    fn prompt_request_tolerates_missing_and_non_string_prompt() {
        let missing: PromptRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.prompt_text(), None);

        let number: PromptRequest = serde_json::from_value(json!({ "prompt": 42 })).unwrap();
        assert_eq!(number.prompt_text(), None);

        let text: PromptRequest =
            serde_json::from_value(json!({ "prompt": "O que é TDAH?" })).unwrap();
        assert_eq!(text.prompt_text(), Some("O que é TDAH?"));
    }
}
