//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a word list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing meaning for \"{word}\" at line {line}")]
    MissingMeaning { word: String, line: usize },

    #[error("empty word at line {line}")]
    EmptyWord { line: usize },

    #[error("duplicate word \"{word}\" at line {line}")]
    DuplicateWord { word: String, line: usize },

    #[error("{field} at line {line} appears before any Word: entry")]
    OrphanField { field: &'static str, line: usize },
}

/// Errors raised while building a scheduler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid interval table: {0}")]
    InvalidIntervalTable(String),
}

/// Errors raised by the candidate selector.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The category filter removed every record. User-correctable: relax the filter.
    #[error("no vocabulary matches the category \"{category}\"")]
    EmptyCandidatePool { category: String },
}
