use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::prompt::{FailureKind, PromptResult, RelayResponse};

pub const BAD_REQUEST_MESSAGE: &str = "Requisição inválida. Use POST e forneça o campo \"prompt\".";
pub const MISSING_KEY_MESSAGE: &str = "Erro de servidor: Chave da API não carregada.";
pub const PROVIDER_FAILURE_MESSAGE: &str = "Erro interno na comunicação com a IA.";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to reach model provider: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode model provider response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("model provider returned no text")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("GEMINI_KEY is not configured")]
    MissingCredential,
    #[error("prompt is missing or blank")]
    BadRequest,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl RelayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RelayError::MissingCredential => FailureKind::Configuration,
            RelayError::BadRequest => FailureKind::BadRequest,
            RelayError::Provider(_) => FailureKind::Provider,
        }
    }

    /// The only text a client ever sees for this error.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MissingCredential => MISSING_KEY_MESSAGE,
            RelayError::BadRequest => BAD_REQUEST_MESSAGE,
            RelayError::Provider(_) => PROVIDER_FAILURE_MESSAGE,
        }
    }
}

impl From<RelayError> for PromptResult {
    fn from(err: RelayError) -> Self {
        PromptResult::failure(err.kind(), err.public_message())
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest => StatusCode::BAD_REQUEST,
            RelayError::MissingCredential | RelayError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(RelayResponse::Error {
            message: self.public_message().to_string(),
        })
    }
}
