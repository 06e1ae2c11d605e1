//! Settings commands.

use super::{CommandError, Result};
use crate::db::{SettingsRepository, SqliteRepository};
use tracing::info;
use vocab_core::{IntervalLadder, IntervalTable, StudySettings};

/// Partial settings change; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub interval_days: Option<Vec<u32>>,
    pub quiz_size: Option<u32>,
    pub daily_reset_hour: Option<u32>,
}

pub fn get_settings(repo: &SqliteRepository) -> Result<StudySettings> {
    repo.get_settings().map_err(Into::into)
}

pub fn update_settings(repo: &SqliteRepository, update: SettingsUpdate) -> Result<StudySettings> {
    let mut settings = repo.get_settings()?;

    if let Some(days) = update.interval_days {
        // Validate before persisting.
        IntervalTable::new(days.clone())?;
        settings.interval_days = days;
    }
    if let Some(size) = update.quiz_size {
        if size == 0 {
            return Err(CommandError::InvalidInput("quiz size must be at least 1".into()));
        }
        settings.quiz_size = size;
    }
    if let Some(hour) = update.daily_reset_hour {
        settings.daily_reset_hour = hour;
    }

    repo.save_settings(&settings)?;
    info!(
        intervals = ?settings.interval_days,
        quiz_size = settings.quiz_size,
        reset_hour = settings.daily_reset_hour,
        "saved settings"
    );
    Ok(settings)
}

/// Build the scheduler from stored settings.
pub fn load_algorithm(repo: &SqliteRepository) -> Result<IntervalLadder> {
    let settings = repo.get_settings()?;
    let table = IntervalTable::new(settings.interval_days)?;
    Ok(IntervalLadder::new(table))
}
