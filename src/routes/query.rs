use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, Scope};

use crate::handlers;
use crate::services::relay::Relay;

pub const QUERY_PATH: &str = "/dsm5Query";

pub fn query_routes(relay: web::Data<Relay>) -> Scope {
    web::scope("").app_data(relay).service(
        web::resource(QUERY_PATH)
            .route(web::post().to(handlers::query_handler))
            .route(web::method(Method::OPTIONS).to(handlers::preflight_handler))
            .default_service(web::to(handlers::invalid_method_handler)),
    )
}

/// Headers browsers need for cross-origin calls to the relay.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}
