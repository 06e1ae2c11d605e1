//! Statistics commands.

use super::Result;
use crate::db::{SqliteRepository, StatsRepository, VaultStats};
use chrono::{DateTime, Utc};

pub fn get_stats(repo: &SqliteRepository, now: DateTime<Utc>) -> Result<VaultStats> {
    repo.get_vault_stats(now).map_err(Into::into)
}
