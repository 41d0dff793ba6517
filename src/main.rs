use actix_web::web;
use dotenvy::dotenv;
use order_form::{build_server, build_service, AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Using menu service at {} and order service at {}",
        config.services.menu_url(),
        config.services.orders_url()
    );

    let service = web::Data::new(build_service(&config));

    log::info!("Idle forms expire after {} minutes", config.form_ttl.num_minutes());
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(service, &config.host, config.port)?.await
}
