//! Process configuration from the environment.

use std::path::PathBuf;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "VAULT_DB_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Load from `.env` and the process environment.
    ///
    /// An explicit `db_override` (the `--db` flag) beats `VAULT_DB_PATH`,
    /// which beats the platform data directory.
    pub fn load(db_override: Option<PathBuf>) -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(db_override, |key| std::env::var(key).ok())
    }

    fn from_lookup(db_override: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = db_override
            .or_else(|| lookup(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(default_db_path);
        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        Self { db_path, log_level }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ielts-vault")
        .join("vault.db")
}
