//! Interval ladder scheduler.
//!
//! A correct answer climbs one rung of the interval table (saturating at the
//! top); a wrong answer drops back to level 0 and is due again tomorrow.

use super::interval::{IntervalTable, RELEARN_DELAY_DAYS};
use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::VocabularyRecord;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Default)]
pub struct IntervalLadder {
    table: IntervalTable,
}

impl IntervalLadder {
    pub fn new(table: IntervalTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &IntervalTable {
        &self.table
    }
}

impl SpacedRepetitionAlgorithm for IntervalLadder {
    fn name(&self) -> &'static str {
        "ladder"
    }

    fn record_outcome(
        &self,
        record: &VocabularyRecord,
        was_correct: bool,
        now: DateTime<Utc>,
    ) -> SchedulingResult {
        // Records may come from older stores with levels beyond this table.
        let current = self.table.clamp_level(record.mastery_level);

        let (new_level, delay_days) = if was_correct {
            let level = (current + 1).min(self.table.max_level());
            (level, self.table.days_for(level))
        } else {
            (0, RELEARN_DELAY_DAYS)
        };

        let mut updated = record.clone();
        updated.mastery_level = new_level;
        updated.next_review_at = now
            .checked_add_signed(Duration::days(i64::from(delay_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SchedulingResult {
            record: updated,
            previous_level: current,
            was_correct,
        }
    }
}
