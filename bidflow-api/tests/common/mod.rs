#![allow(dead_code)]

use actix_web::{test, web, App};
use bidflow_api::handlers;
use bidflow_api::helpers::database::initialize_database;
use bidflow_api::storage::SqliteStorage;
use bidflow_api::AppState;
use bidflow_engine::GeneratorConfig;
use bidflow_types::{
    AddProjectRequest, Sector, Tender, TenderStatus, UpsertCompanyRequest,
};
use tempfile::NamedTempFile;

pub struct TestApp<S> {
    pub storage: SqliteStorage,
    pub app: S,
    _db_file: NamedTempFile,
}

/// Millisecond-scale stream timing so generation tests finish quickly.
pub fn fast_generator() -> GeneratorConfig {
    GeneratorConfig {
        initial_delay_ms: 0,
        chunk_delay_ms: 1,
        words_per_chunk: 5,
    }
}

pub async fn setup_test_app() -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    let db_file = NamedTempFile::new()?;
    let connection = initialize_database(db_file.path())?;
    let storage = SqliteStorage::new(connection);
    let state = AppState {
        storage: storage.clone(),
        generator: fast_generator(),
    };

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
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
            .service(handlers::profile::add_certification),
    )
    .await;

    Ok(TestApp {
        storage,
        app,
        _db_file: db_file,
    })
}

/// A company owned by the given external caller id; returns
/// (user_id, company_id). Caller ids come from the upstream identity
/// provider and have no local record of their own.
pub fn seed_user_with_company(
    storage: &SqliteStorage,
    user_id: &str,
    tags: &[&str],
) -> anyhow::Result<(String, String)> {
    let company = storage.upsert_company(
        user_id,
        &UpsertCompanyRequest {
            name: "Acme Digital Ltd".to_string(),
            sectors: vec![Sector::It],
            capability_tags: tags.iter().map(|t| t.to_string()).collect(),
        },
    )?;
    Ok((user_id.to_string(), company.id))
}

pub fn seed_project(
    storage: &SqliteStorage,
    company_id: &str,
    value_range: &str,
) -> anyhow::Result<()> {
    storage.add_project(
        company_id,
        &AddProjectRequest {
            name: "Patient Portal Rebuild".to_string(),
            sector: Sector::It,
            value_range: value_range.to_string(),
            year_completed: 2023,
        },
    )?;
    Ok(())
}

pub fn seed_tender(
    storage: &SqliteStorage,
    id: &str,
    sector: Sector,
    value: i64,
    requirements: Option<serde_json::Value>,
) -> anyhow::Result<Tender> {
    let now = chrono::Utc::now().timestamp();
    let tender = Tender {
        id: id.to_string(),
        title: format!("Tender {id}"),
        description: "A public procurement opportunity.".to_string(),
        value,
        deadline: now + 30 * 86_400,
        sector,
        source: "TED".to_string(),
        status: TenderStatus::Open,
        requirements: requirements.map(|r| r.to_string()),
        documents: None,
        created_at: now,
        updated_at: now,
    };
    storage.insert_tender(&tender)?;
    Ok(tender)
}
