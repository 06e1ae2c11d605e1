//! Vault commands invoked by the CLI.

pub mod settings;
pub mod stats;
pub mod study;
pub mod words;

pub use settings::{get_settings, load_algorithm, update_settings, SettingsUpdate};
pub use stats::get_stats;
pub use study::{start_quiz, submit_quiz, Quiz, QuizPlan, QuizRequest};
pub use words::{add_word, import_file, list_words, remove_word, AddWord, ImportResult, ListFilter};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Db(#[from] crate::db::DbError),

    #[error("parse error: {0}")]
    Parse(#[from] vocab_core::ParseError),

    #[error("{0}; try a broader category or drop the filter")]
    Selection(#[from] vocab_core::SelectionError),

    #[error(transparent)]
    Schedule(#[from] vocab_core::ScheduleError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CommandError>;
