//! Spaced repetition scheduling.

pub mod interval;
pub mod ladder;

pub use interval::{IntervalTable, DEFAULT_INTERVAL_DAYS, MAX_INTERVAL_DAYS, RELEARN_DELAY_DAYS};
pub use ladder::IntervalLadder;

use crate::types::VocabularyRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of scheduling a record after a quiz outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingResult {
    /// Updated copy of the record, ready to persist.
    pub record: VocabularyRecord,
    /// Mastery level before the outcome (after clamping).
    pub previous_level: u32,
    pub was_correct: bool,
}

impl SchedulingResult {
    pub fn next_due(&self) -> DateTime<Utc> {
        self.record.next_review_at
    }
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Apply a correct/incorrect outcome at `now`. Must not read the clock.
    fn record_outcome(
        &self,
        record: &VocabularyRecord,
        was_correct: bool,
        now: DateTime<Utc>,
    ) -> SchedulingResult;
}
