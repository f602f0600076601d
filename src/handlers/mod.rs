use actix_web::{web, HttpResponse};
use log::{error, warn};

use crate::errors::RelayError;
use crate::models::prompt::{PromptRequest, RelayResponse};
use crate::services::relay::Relay;

/// POST handler. A body that fails to parse as JSON is treated like a
/// missing prompt.
pub async fn query_handler(
    body: Option<web::Json<PromptRequest>>,
    relay: web::Data<Relay>,
) -> Result<HttpResponse, RelayError> {
    let prompt = body.as_ref().and_then(|body| body.prompt_text());

    match relay.relay(prompt).await {
        Ok(text) => Ok(HttpResponse::Ok().json(RelayResponse::Success { text })),
        Err(err) => {
            match &err {
                RelayError::MissingCredential => error!("GEMINI_KEY was not loaded"),
                RelayError::BadRequest => warn!("Rejected request without a usable prompt"),
                RelayError::Provider(_) => {}
            }
            Err(err)
        }
    }
}

pub async fn preflight_handler() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

pub async fn invalid_method_handler() -> Result<HttpResponse, RelayError> {
    Err(RelayError::BadRequest)
}
