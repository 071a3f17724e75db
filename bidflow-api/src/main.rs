use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use bidflow_api::config::ApiConfig;
use bidflow_api::helpers::database::initialize_database;
use bidflow_api::storage::SqliteStorage;
use bidflow_api::{handlers, AppState};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (config, config_path) = ApiConfig::load().context("failed to load configuration")?;
    info!(config = %config_path.display(), "configuration loaded");

    // The section catalogue and the question generator share their id
    // constants; fail fast if they ever drift apart.
    let gaps = bidflow_engine::coverage_gaps();
    anyhow::ensure!(
        gaps.is_empty(),
        "question ids not covered by any bid section: {gaps:?}"
    );

    let connection = initialize_database(&config.database.path)
        .context("failed to initialize database")?;
    let state = AppState {
        storage: SqliteStorage::new(connection),
        generator: config.generation.clone(),
    };

    let allowed_origins = config
        .cors
        .as_ref()
        .map(|cors| cors.allowed_origins.clone())
        .unwrap_or_default();

    let bind_addr = (config.server.host.clone(), config.server.port);
    info!(
        "Starting bidflow-api server at http://{}:{}",
        config.server.host, config.server.port
    );

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT"])
            .allow_any_header();
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .service(handlers::health::health)
            .service(handlers::tenders::list_tenders)
            .service(handlers::tenders::get_tender)
            .service(handlers::tenders::get_tender_questions)
            .service(handlers::bids::create_bid)
            .service(handlers::bids::list_bids)
            .service(handlers::bids::get_bid)
            .service(handlers::bids::save_draft)
            .service(handlers::bids::update_status)
            .service(handlers::bids::generate_bid)
            .service(handlers::profile::get_profile)
            .service(handlers::profile::upsert_profile)
            .service(handlers::profile::add_project)
            .service(handlers::profile::add_certification)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
