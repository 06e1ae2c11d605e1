//! Local SQLite database operations.

pub mod date_utils;
pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{
    ReviewLogEntry, ReviewLogRepository, SettingsRepository, SqliteRepository, StatsRepository,
    VaultStats, WordRepository,
};
