//! Repository pattern for database access.

use crate::db::date_utils::start_of_study_day;
use crate::db::error::DbError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use vocab_core::{RecordStore, SchedulingResult, StudySettings, VocabularyRecord};

type Result<T> = std::result::Result<T, DbError>;

/// Repository for vault word operations beyond the record store contract.
pub trait WordRepository {
    fn get_word(&self, word: &str) -> Result<Option<VocabularyRecord>>;
    /// Insert a new word. Fails with `DuplicateWord` if it is already saved.
    fn insert_word(&self, record: &VocabularyRecord) -> Result<()>;
    /// Insert many words, skipping ones already saved. Returns the number inserted.
    fn insert_words(&self, records: &[VocabularyRecord]) -> Result<usize>;
    fn count_words(&self) -> Result<usize>;
}

/// Repository for the review activity log.
pub trait ReviewLogRepository {
    fn insert_review(&self, entry: &ReviewLogEntry) -> Result<i64>;
    fn get_reviews_since(&self, since: DateTime<Utc>) -> Result<Vec<ReviewLogEntry>>;
}

/// Repository for settings operations.
pub trait SettingsRepository {
    fn get_settings(&self) -> Result<StudySettings>;
    fn save_settings(&self, settings: &StudySettings) -> Result<()>;
}

/// Repository for statistics operations.
pub trait StatsRepository {
    fn get_vault_stats(&self, now: DateTime<Utc>) -> Result<VaultStats>;
}

/// One applied quiz outcome.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewLogEntry {
    pub id: i64,
    pub word: String,
    pub reviewed_at: DateTime<Utc>,
    pub was_correct: bool,
    pub level_before: u32,
    pub level_after: u32,
    pub next_review_at: DateTime<Utc>,
}

impl ReviewLogEntry {
    pub fn from_result(result: &SchedulingResult, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            id: 0, // Will be assigned by database
            word: result.record.word.clone(),
            reviewed_at,
            was_correct: result.was_correct,
            level_before: result.previous_level,
            level_after: result.record.mastery_level,
            next_review_at: result.record.next_review_at,
        }
    }
}

/// Vault statistics.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VaultStats {
    pub total_words: usize,
    pub due_now: usize,
    /// Word count per mastery level, index = level.
    pub mastery_distribution: Vec<usize>,
    pub reviews_today: usize,
    pub correct_today: usize,
    pub accuracy_today: f64,
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_SETTINGS)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<VocabularyRecord> {
        let due_ms: i64 = row.get(5)?;
        Ok(VocabularyRecord {
            word: row.get(0)?,
            meaning: row.get(1)?,
            part_of_speech: row.get(2)?,
            example: row.get(3)?,
            mastery_level: row.get(4)?,
            next_review_at: millis_to_datetime(5, due_ms)?,
        })
    }

    fn insert_or_ignore(&self, record: &VocabularyRecord) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO words (word, meaning, part_of_speech, example, mastery_level, next_review_at, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.word,
                record.meaning,
                record.part_of_speech,
                record.example,
                record.mastery_level,
                record.next_review_at.timestamp_millis(),
                to_timestamp_text(Utc::now()),
            ],
        )?;
        Ok(inserted > 0)
    }
}

fn millis_to_datetime(column: usize, ms: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or(rusqlite::Error::IntegralValueOutOfRange(column, ms))
}

/// Fixed-width UTC text (millisecond precision, `Z` suffix), so text order is time order.
fn to_timestamp_text(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_rfc3339(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl RecordStore for SqliteRepository {
    type Error = DbError;

    fn get_all(&self) -> Result<Vec<VocabularyRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT word, meaning, part_of_speech, example, mastery_level, next_review_at
             FROM words ORDER BY rowid",
        )?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn update(&mut self, record: &VocabularyRecord) -> Result<()> {
        self.conn.execute(
            "UPDATE words SET meaning = ?2, part_of_speech = ?3, example = ?4,
                mastery_level = ?5, next_review_at = ?6
             WHERE word = ?1",
            params![
                record.word,
                record.meaning,
                record.part_of_speech,
                record.example,
                record.mastery_level,
                record.next_review_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn remove(&mut self, word: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM words WHERE word = ?1", params![word])?;
        Ok(removed > 0)
    }
}

impl WordRepository for SqliteRepository {
    fn get_word(&self, word: &str) -> Result<Option<VocabularyRecord>> {
        self.conn
            .query_row(
                "SELECT word, meaning, part_of_speech, example, mastery_level, next_review_at
                 FROM words WHERE word = ?1",
                params![word],
                Self::row_to_record,
            )
            .optional()
            .map_err(Into::into)
    }

    fn insert_word(&self, record: &VocabularyRecord) -> Result<()> {
        if self.insert_or_ignore(record)? {
            Ok(())
        } else {
            Err(DbError::DuplicateWord(record.word.clone()))
        }
    }

    fn insert_words(&self, records: &[VocabularyRecord]) -> Result<usize> {
        let mut count = 0;
        for record in records {
            if self.insert_or_ignore(record)? {
                count += 1;
            }
        }
        Ok(count)
    }

    fn count_words(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl ReviewLogRepository for SqliteRepository {
    fn insert_review(&self, entry: &ReviewLogEntry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO review_log (word, reviewed_at, was_correct, level_before, level_after, next_review_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.word,
                to_timestamp_text(entry.reviewed_at),
                entry.was_correct,
                entry.level_before,
                entry.level_after,
                entry.next_review_at.timestamp_millis(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_reviews_since(&self, since: DateTime<Utc>) -> Result<Vec<ReviewLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, word, reviewed_at, was_correct, level_before, level_after, next_review_at
             FROM review_log WHERE reviewed_at >= ?1 ORDER BY id",
        )?;

        let entries = stmt
            .query_map(params![to_timestamp_text(since)], |row| {
                let reviewed_at: String = row.get(2)?;
                let due_ms: i64 = row.get(6)?;
                Ok(ReviewLogEntry {
                    id: row.get(0)?,
                    word: row.get(1)?,
                    reviewed_at: parse_rfc3339(2, &reviewed_at)?,
                    was_correct: row.get(3)?,
                    level_before: row.get(4)?,
                    level_after: row.get(5)?,
                    next_review_at: millis_to_datetime(6, due_ms)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_settings(&self) -> Result<StudySettings> {
        let (interval_json, quiz_size, daily_reset_hour): (String, u32, u32) = self.conn.query_row(
            "SELECT interval_days, quiz_size, daily_reset_hour FROM settings WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(StudySettings {
            interval_days: serde_json::from_str(&interval_json)?,
            quiz_size,
            daily_reset_hour,
        })
    }

    fn save_settings(&self, settings: &StudySettings) -> Result<()> {
        if settings.daily_reset_hour > 23 {
            return Err(DbError::InvalidData(format!(
                "daily reset hour must be 0-23, got {}",
                settings.daily_reset_hour
            )));
        }
        self.conn.execute(
            "UPDATE settings SET interval_days = ?1, quiz_size = ?2, daily_reset_hour = ?3 WHERE id = 1",
            params![
                serde_json::to_string(&settings.interval_days)?,
                settings.quiz_size,
                settings.daily_reset_hour,
            ],
        )?;
        Ok(())
    }
}

impl StatsRepository for SqliteRepository {
    fn get_vault_stats(&self, now: DateTime<Utc>) -> Result<VaultStats> {
        let settings = self.get_settings()?;
        let levels = settings.interval_days.len().max(1);

        let total_words = self.count_words()?;
        let due_now: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM words WHERE next_review_at <= ?1",
            params![now.timestamp_millis()],
            |row| row.get(0),
        )?;

        let mut mastery_distribution = vec![0usize; levels];
        let mut stmt = self
            .conn
            .prepare("SELECT mastery_level, COUNT(*) FROM words GROUP BY mastery_level")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, i64>(1)?)))?;
        for row in rows {
            let (level, count) = row?;
            // Levels beyond the current table count as mastered.
            let index = (level as usize).min(levels - 1);
            mastery_distribution[index] += count as usize;
        }

        let since = start_of_study_day(now, settings.daily_reset_hour);
        let today = self.get_reviews_since(since)?;
        let reviews_today = today.len();
        let correct_today = today.iter().filter(|e| e.was_correct).count();
        let accuracy_today = if reviews_today > 0 {
            correct_today as f64 / reviews_today as f64
        } else {
            0.0
        };

        Ok(VaultStats {
            total_words,
            due_now: due_now as usize,
            mastery_distribution,
            reviews_today,
            correct_today,
            accuracy_today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 20, 10, 0, 0).unwrap()
    }

    fn repo_with(words: &[&str]) -> SqliteRepository {
        let repo = SqliteRepository::open_in_memory().unwrap();
        for word in words {
            repo.insert_word(&VocabularyRecord::new(*word, format!("{word} meaning"), now()))
                .unwrap();
        }
        repo
    }

    #[test]
    fn get_all_returns_insertion_order() {
        let repo = repo_with(&["zeal", "abate", "mitigate"]);
        let words: Vec<_> = repo.get_all().unwrap().into_iter().map(|r| r.word).collect();
        assert_eq!(words, vec!["zeal", "abate", "mitigate"]);
    }

    #[test]
    fn record_round_trip_keeps_millis() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let due = now() + Duration::milliseconds(1234);
        let mut record = VocabularyRecord::new("lucid", "clear", due)
            .with_part_of_speech("adjective")
            .with_example("A lucid explanation.");
        record.mastery_level = 3;
        repo.insert_word(&record).unwrap();

        assert_eq!(repo.get_word("lucid").unwrap(), Some(record));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let repo = repo_with(&["zeal"]);
        let err = repo
            .insert_word(&VocabularyRecord::new("zeal", "again", now()))
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateWord(w) if w == "zeal"));
    }

    #[test]
    fn insert_words_skips_existing() {
        let repo = repo_with(&["zeal"]);
        let batch = vec![
            VocabularyRecord::new("zeal", "", now()),
            VocabularyRecord::new("candid", "", now()),
        ];
        assert_eq!(repo.insert_words(&batch).unwrap(), 1);
        assert_eq!(repo.count_words().unwrap(), 2);
    }

    #[test]
    fn update_replaces_schedule() {
        let mut repo = repo_with(&["zeal"]);
        let mut record = repo.get_word("zeal").unwrap().unwrap();
        record.mastery_level = 2;
        record.next_review_at = now() + Duration::days(7);
        repo.update(&record).unwrap();
        assert_eq!(repo.get_word("zeal").unwrap().unwrap(), record);
    }

    #[test]
    fn update_does_not_create() {
        let mut repo = repo_with(&[]);
        repo.update(&VocabularyRecord::new("ghost", "", now())).unwrap();
        assert_eq!(repo.count_words().unwrap(), 0);
    }

    #[test]
    fn remove_deletes_word() {
        let mut repo = repo_with(&["zeal"]);
        assert!(repo.remove("zeal").unwrap());
        assert!(!repo.remove("zeal").unwrap());
        assert_eq!(repo.get_word("zeal").unwrap(), None);
    }

    #[test]
    fn settings_default_and_save() {
        let repo = repo_with(&[]);
        assert_eq!(repo.get_settings().unwrap(), StudySettings::default());

        let settings = StudySettings {
            interval_days: vec![2, 4, 8],
            quiz_size: 5,
            daily_reset_hour: 4,
        };
        repo.save_settings(&settings).unwrap();
        assert_eq!(repo.get_settings().unwrap(), settings);
    }

    #[test]
    fn settings_reject_bad_reset_hour() {
        let repo = repo_with(&[]);
        let settings = StudySettings {
            daily_reset_hour: 24,
            ..Default::default()
        };
        assert!(matches!(
            repo.save_settings(&settings),
            Err(DbError::InvalidData(_))
        ));
    }

    #[test]
    fn review_log_filters_by_time() {
        let repo = repo_with(&["zeal"]);
        let entry = |at: DateTime<Utc>, correct: bool| ReviewLogEntry {
            id: 0,
            word: "zeal".into(),
            reviewed_at: at,
            was_correct: correct,
            level_before: 0,
            level_after: 1,
            next_review_at: at + Duration::days(3),
        };
        repo.insert_review(&entry(now() - Duration::days(2), true)).unwrap();
        let id = repo.insert_review(&entry(now(), false)).unwrap();

        let recent = repo.get_reviews_since(now() - Duration::hours(1)).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, id);
        assert!(!recent[0].was_correct);
    }

    #[test]
    fn review_log_since_is_inclusive_and_sub_second() {
        let repo = repo_with(&["zeal"]);
        let entry = |at: DateTime<Utc>| ReviewLogEntry {
            id: 0,
            word: "zeal".into(),
            reviewed_at: at,
            was_correct: true,
            level_before: 0,
            level_after: 1,
            next_review_at: at + Duration::days(3),
        };
        repo.insert_review(&entry(now() - Duration::milliseconds(1))).unwrap();
        repo.insert_review(&entry(now())).unwrap();
        repo.insert_review(&entry(now() + Duration::milliseconds(250))).unwrap();

        let since: Vec<_> = repo
            .get_reviews_since(now())
            .unwrap()
            .into_iter()
            .map(|e| e.reviewed_at)
            .collect();
        assert_eq!(since, vec![now(), now() + Duration::milliseconds(250)]);
    }

    #[test]
    fn words_are_unique_ignoring_case() {
        let repo = repo_with(&["Lucid"]);
        let err = repo
            .insert_word(&VocabularyRecord::new("lucid", "clear", now()))
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateWord(w) if w == "lucid"));
        assert_eq!(repo.count_words().unwrap(), 1);
        assert_eq!(repo.get_word("LUCID").unwrap().unwrap().word, "Lucid");
    }

    #[test]
    fn stats_count_due_and_levels() {
        let mut repo = repo_with(&["a", "b", "c"]);
        let mut later = repo.get_word("c").unwrap().unwrap();
        later.mastery_level = 9;
        later.next_review_at = now() + Duration::days(1);
        repo.update(&later).unwrap();

        let stats = repo.get_vault_stats(now()).unwrap();
        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.due_now, 2);
        assert_eq!(stats.mastery_distribution, vec![2, 0, 0, 0, 1]);
        assert_eq!(stats.reviews_today, 0);
        assert_eq!(stats.accuracy_today, 0.0);
    }
}
