use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use outfit_matrix::config::{LoggingSettings, Settings};
use outfit_matrix::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use outfit_matrix::{Catalog, CatalogError, CatalogStore, Matcher};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "plain" => subscriber.init(),
        _ => subscriber.json().init(),
    }
}

fn load_catalog(path: Option<&str>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => Catalog::load(path),
        None => Catalog::embedded(),
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration; logging is not up yet, so report on stderr
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging);

    info!("Starting Outfit Matrix matching service...");

    // A malformed matrix must stop startup rather than serve partial results
    let catalog = load_catalog(settings.catalog.path.as_deref())
        .map_err(|e| startup_error("Failed to load outfit catalog", e))?;

    info!(
        "Catalog {} loaded with {} entries (source: {})",
        catalog.version(),
        catalog.len(),
        settings.catalog.path.as_deref().unwrap_or("embedded")
    );

    // Initialize matcher with configured weights
    let weights = settings
        .scoring
        .weights
        .to_weights()
        .map_err(|e| startup_error("Invalid scoring weights", e))?;

    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", matcher.weights());

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(CatalogStore::new(catalog)),
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
