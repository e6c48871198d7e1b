use std::env;
use std::time::Duration;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::{Config, Environment, File};
use dotenvy::dotenv;
use tera::Tera;

use finscope::i18n::Dictionaries;
use finscope::models::config::ServerConfig;
use finscope::repository::fixture::FixtureSource;
use finscope::routes::{CatalogState, configure};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Error loading settings: {e}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Error parsing settings: {e}");
            std::process::exit(1);
        }
    };

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Error loading templates: {e}");
            std::process::exit(1);
        }
    };

    let dictionaries = match Dictionaries::load() {
        Ok(dictionaries) => dictionaries,
        Err(e) => {
            log::error!("Error loading dictionaries: {e}");
            std::process::exit(1);
        }
    };

    let catalog = web::Data::new(CatalogState::new(
        FixtureSource::new(&server_config.data_dir),
        Duration::from_millis(server_config.simulated_latency_ms),
    ));
    let tera = web::Data::new(tera);
    let dictionaries = web::Data::new(dictionaries);
    let bind_address = (server_config.address.clone(), server_config.port);
    let server_config = web::Data::new(server_config);

    log::info!(
        "Starting FinScope on {}:{} ({})",
        bind_address.0,
        bind_address.1,
        server_config.base_url()
    );

    HttpServer::new(move || {
        let assets_dir = server_config.assets_dir.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(catalog.clone())
            .app_data(tera.clone())
            .app_data(dictionaries.clone())
            .app_data(server_config.clone())
            .configure(|cfg| configure(cfg, &assets_dir))
    })
    .bind(bind_address)?
    .run()
    .await
}
