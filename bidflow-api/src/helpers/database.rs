use crate::storage::migrations;
use crate::DbConnection;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub fn initialize_database(db_path: &Path) -> anyhow::Result<DbConnection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    migrations::run_migrations(&mut conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}
