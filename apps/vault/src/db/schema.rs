//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local vault database.
pub const SCHEMA: &str = r#"
-- Saved vocabulary and its schedule
CREATE TABLE IF NOT EXISTS words (
    word TEXT PRIMARY KEY COLLATE NOCASE,
    meaning TEXT NOT NULL DEFAULT '',
    part_of_speech TEXT NOT NULL DEFAULT '',
    example TEXT NOT NULL DEFAULT '',
    mastery_level INTEGER NOT NULL DEFAULT 0,
    next_review_at INTEGER NOT NULL,
    added_at TEXT NOT NULL
);

-- One row per applied quiz outcome
CREATE TABLE IF NOT EXISTS review_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL,
    reviewed_at TEXT NOT NULL,
    was_correct INTEGER NOT NULL,
    level_before INTEGER NOT NULL,
    level_after INTEGER NOT NULL,
    next_review_at INTEGER NOT NULL
);

-- Study settings
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    interval_days TEXT NOT NULL DEFAULT '[1,3,7,14,30]',
    quiz_size INTEGER NOT NULL DEFAULT 10,
    daily_reset_hour INTEGER NOT NULL DEFAULT 0
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_words_due ON words(next_review_at);
CREATE INDEX IF NOT EXISTS idx_review_log_reviewed ON review_log(reviewed_at);
"#;

/// Initialize settings if not exists.
pub const INIT_SETTINGS: &str = r#"
INSERT OR IGNORE INTO settings (id) VALUES (1);
"#;
