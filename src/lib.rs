pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use utoipa::OpenApi;

pub use application::order_form_service::OrderFormService;
pub use config::{AppConfig, ServiceUrls};
use infrastructure::http_client::{HttpMenuClient, HttpOrderClient};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::menu::get_menu,
        handlers::forms::create_form,
        handlers::forms::get_form,
        handlers::forms::delete_form,
        handlers::forms::update_field,
        handlers::forms::add_line,
        handlers::forms::remove_line,
        handlers::forms::reset_form,
        handlers::forms::refresh_menu,
        handlers::forms::get_summary,
        handlers::forms::submit_form,
    ),
    tags(
        (name = "forms", description = "Draft order forms"),
        (name = "menu", description = "Menu passthrough"),
    )
)]
pub struct ApiDoc;

/// Wires the form service to the real menu and order services.
pub fn build_service(config: &AppConfig) -> OrderFormService {
    let client = reqwest::Client::new();
    OrderFormService::new(
        Arc::new(HttpMenuClient::new(client.clone(), &config.services)),
        Arc::new(HttpOrderClient::new(client, &config.services)),
    )
    .with_form_ttl(config.form_ttl)
}

/// Registers every route. The caller provides `web::Data<OrderFormService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/menu", web::get().to(handlers::menu::get_menu))
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
        .service(
            web::scope("/forms")
                .route("", web::post().to(handlers::forms::create_form))
                .route("/{id}", web::get().to(handlers::forms::get_form))
                .route("/{id}", web::patch().to(handlers::forms::update_field))
                .route("/{id}", web::delete().to(handlers::forms::delete_form))
                .route("/{id}/lines", web::post().to(handlers::forms::add_line))
                .route(
                    "/{id}/lines/{index}",
                    web::delete().to(handlers::forms::remove_line),
                )
                .route("/{id}/reset", web::post().to(handlers::forms::reset_form))
                .route("/{id}/menu", web::post().to(handlers::forms::refresh_menu))
                .route("/{id}/summary", web::get().to(handlers::forms::get_summary))
                .route("/{id}/submit", web::post().to(handlers::forms::submit_form)),
        );
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: web::Data<OrderFormService>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}
