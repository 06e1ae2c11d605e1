//! Core vocabulary library shared by the vault application.
//!
//! Provides:
//! - Interval-ladder spaced repetition scheduling
//! - Quiz candidate selection (due words first)
//! - Session grading against a pluggable record store
//! - Word-list parser for bulk imports
//! - Shared types (VocabularyRecord, QuizQuestion, StudySettings, etc.)

pub mod algorithm;
pub mod error;
pub mod grader;
pub mod matching;
pub mod parser;
pub mod selector;
pub mod store;
pub mod types;

pub use algorithm::{IntervalLadder, IntervalTable, SchedulingResult, SpacedRepetitionAlgorithm};
pub use error::{ParseError, Result, ScheduleError, SelectionError};
pub use grader::{grade_into, grade_records, grade_session, QuestionResult, SessionReport};
pub use matching::{find_record_for_question, is_correct_answer, position_for_question};
pub use parser::parse;
pub use selector::{select_candidates, CategoryField, CategoryFilter};
pub use store::{MemoryStore, RecordStore};
pub use types::{QuizQuestion, RawWord, StudySettings, VocabularyRecord};
