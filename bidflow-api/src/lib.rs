use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub mod config;
pub mod handlers;
pub mod helpers;
pub mod storage;

pub type DbConnection = Arc<Mutex<Connection>>;

/// Shared application state: the record store plus the generation timing
/// configuration loaded at startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: storage::SqliteStorage,
    pub generator: bidflow_engine::GeneratorConfig,
}
