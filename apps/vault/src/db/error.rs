//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word not found: {0}")]
    WordNotFound(String),

    #[error("word already saved: {0}")]
    DuplicateWord(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
