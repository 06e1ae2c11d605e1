//! Review delays indexed by mastery level.

use crate::error::ScheduleError;

/// Default ladder: 1, 3, 7, 14 and 30 days.
pub const DEFAULT_INTERVAL_DAYS: [u32; 5] = [1, 3, 7, 14, 30];

/// Re-exposure delay after a wrong answer. Not looked up from the table.
pub const RELEARN_DELAY_DAYS: u32 = 1;

/// Longest accepted interval, roughly a hundred years.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Immutable, non-decreasing table of review delays in days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    days: Vec<u32>,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            days: DEFAULT_INTERVAL_DAYS.to_vec(),
        }
    }
}

impl IntervalTable {
    /// Build a table, rejecting empty, zero, oversized or decreasing entries.
    pub fn new(days: Vec<u32>) -> Result<Self, ScheduleError> {
        if days.is_empty() {
            return Err(ScheduleError::InvalidIntervalTable(
                "table must have at least one level".into(),
            ));
        }
        if let Some(level) = days.iter().position(|&d| d == 0) {
            return Err(ScheduleError::InvalidIntervalTable(format!(
                "level {level} has a zero-day interval"
            )));
        }
        if let Some(level) = days.iter().position(|&d| d > MAX_INTERVAL_DAYS) {
            return Err(ScheduleError::InvalidIntervalTable(format!(
                "level {level} ({} days) exceeds the {MAX_INTERVAL_DAYS}-day maximum",
                days[level]
            )));
        }
        if let Some(level) = days.windows(2).position(|w| w[1] < w[0]) {
            return Err(ScheduleError::InvalidIntervalTable(format!(
                "level {} ({} days) is shorter than level {} ({} days)",
                level + 1,
                days[level + 1],
                level,
                days[level]
            )));
        }
        Ok(Self { days })
    }

    /// Number of levels (`L`).
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Highest reachable mastery level (`L - 1`).
    pub fn max_level(&self) -> u32 {
        (self.days.len() - 1) as u32
    }

    /// Clamp an arbitrary level into `[0, L-1]`.
    pub fn clamp_level(&self, level: u32) -> u32 {
        level.min(self.max_level())
    }

    /// Delay for `level`, clamped to the last entry.
    pub fn days_for(&self, level: u32) -> u32 {
        self.days[self.clamp_level(level) as usize]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.days
    }
}
