//! IELTS vocabulary vault: local storage and study commands built on
//! `vocab-core`.

pub mod commands;
pub mod config;
pub mod db;
pub mod logging;

use config::AppConfig;
use db::SqliteRepository;
use tracing::info;

/// Open (creating if needed) the vault database named by `config`.
pub fn open_repository(config: &AppConfig) -> anyhow::Result<SqliteRepository> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    info!(path = %config.db_path.display(), "opening vault");
    Ok(SqliteRepository::open(&config.db_path)?)
}
