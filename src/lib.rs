pub mod analytics;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod journal;
pub mod models;

pub use config::JournalConfig;
pub use error::{JournalError, Result};
pub use journal::Journal;

/// Open the on-disk journal described by `config`, creating the data directory if needed.
pub fn open(config: &JournalConfig) -> Result<Journal<db::Database>> {
    std::fs::create_dir_all(&config.data_dir)?;

    let db_path = config.db_path();
    log::info!("Database path: {:?}", db_path);

    let path = db_path
        .to_str()
        .ok_or_else(|| JournalError::invalid("data_dir", "path is not valid UTF-8"))?;

    let database = db::Database::new(path).map_err(|e| {
        log::error!("Database initialization failed: {}", e);
        e
    })?;

    Journal::load(database, config)
}
