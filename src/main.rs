use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use ecotrack::config::{active_profile, LoggingSettings, Settings};
use ecotrack::core::LocationSearch;
use ecotrack::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use ecotrack::routes::{self, AppState};
use ecotrack::services::{PostgresClient, VisionClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize logging
///
/// The filter comes from RUST_LOG, then LOG_LEVEL, then the configured level.
/// LOG_FORMAT=pretty switches from JSON to human-readable output.
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
            EnvFilter::try_new(level)
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_tracing(
        &settings
            .as_ref()
            .map(|s| s.logging.clone())
            .unwrap_or_default(),
    );

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    info!("Starting EcoTrack waste management service...");

    // Initialize PostgreSQL client (runs migrations)
    let postgres = Arc::new(PostgresClient::from_settings(&settings.database).await.map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        std::io::Error::other(format!("PostgreSQL connection error: {}", e))
    })?);

    // Image analysis is optional
    let vision = match VisionClient::from_settings(&settings.vision) {
        Ok(client) => client.map(Arc::new),
        Err(e) => {
            warn!("Failed to build vision client ({}), image analysis disabled", e);
            None
        }
    };

    let categories = postgres.count_categories().await.unwrap_or_else(|e| {
        warn!("Could not count waste categories: {}", e);
        0
    });

    let bind_address = settings.bind_address();
    info!(
        "EcoTrack ready: address={}, profile={}, waste_categories={}, vision_configured={}",
        bind_address,
        active_profile(),
        categories,
        vision.is_some()
    );

    let app_state = AppState {
        postgres,
        vision,
        search: LocationSearch::new(settings.search.default_radius_km),
        min_tag_confidence: settings.vision.min_tag_confidence,
    };

    let workers = settings.server.workers.unwrap_or(4);
    let allowed_origins = settings.cors.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(build_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((settings.server.host.as_str(), settings.server.port))?
    .run()
    .await
}
