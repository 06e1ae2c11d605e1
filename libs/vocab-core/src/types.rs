//! Core types for the vocabulary vault.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved word and its review schedule.
///
/// `word` is the primary key within a store. The descriptive fields are
/// opaque to scheduling; only `mastery_level` and `next_review_at` change
/// after a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRecord {
    pub word: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub mastery_level: u32,
    /// Epoch milliseconds on the wire. Missing means due right away.
    #[serde(with = "chrono::serde::ts_milliseconds", default = "Utc::now")]
    pub next_review_at: DateTime<Utc>,
}

impl VocabularyRecord {
    /// Create a fresh record at level 0, due at `now`.
    pub fn new(word: impl Into<String>, meaning: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            part_of_speech: String::new(),
            example: String::new(),
            mastery_level: 0,
            next_review_at: now,
        }
    }

    pub fn with_part_of_speech(mut self, pos: impl Into<String>) -> Self {
        self.part_of_speech = pos.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Whether the record is due at `now` (due time at or before now).
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}

/// Word entry parsed from a word list (not yet scheduled).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWord {
    pub word: String,
    pub meaning: String,
    pub part_of_speech: String,
    pub example: String,
    pub line_number: usize,
}

impl RawWord {
    /// Turn into a record that is due at `now`.
    pub fn into_record(self, now: DateTime<Utc>) -> VocabularyRecord {
        VocabularyRecord {
            word: self.word,
            meaning: self.meaning,
            part_of_speech: self.part_of_speech,
            example: self.example,
            mastery_level: 0,
            next_review_at: now,
        }
    }
}

/// A generated quiz question.
///
/// Questions carry no reference to the word they test; the grader matches
/// them back to records by text containment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Study settings persisted by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySettings {
    /// Days until next review, indexed by mastery level.
    pub interval_days: Vec<u32>,
    pub quiz_size: u32,
    pub daily_reset_hour: u32,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            interval_days: crate::algorithm::DEFAULT_INTERVAL_DAYS.to_vec(),
            quiz_size: 10,
            daily_reset_hour: 0,
        }
    }
}
