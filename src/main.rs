use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use dsm5_chat::config::{Config, GEMINI_MODEL};
use dsm5_chat::routes;
use dsm5_chat::services::relay::Relay;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let relay = web::Data::new(Relay::from_config(&config));

    if !relay.has_credential() {
        warn!("GEMINI_KEY is not set; every prompt will be refused with a configuration error");
    }
    info!(
        "Starting dsm5-relay on {} (model {})",
        config.bind_address(),
        GEMINI_MODEL
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(routes::query::cors_headers())
            .service(routes::query::query_routes(relay.clone()))
    })
    .bind(config.bind_address())?
    .run()
    .await
}
