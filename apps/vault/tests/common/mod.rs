//! Common test utilities and fixtures for integration tests.
//!
//! Tests run against an in-memory SQLite vault, or a file-backed one in a
//! temporary directory when reopening matters.

#![allow(dead_code)]

pub mod fixtures;

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use ielts_vault::commands;
use ielts_vault::db::SqliteRepository;
use tempfile::TempDir;

/// Fixed "now" so due dates are predictable.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap()
}

/// Test context holding a vault and (optionally) its backing directory.
pub struct TestContext {
    pub repo: SqliteRepository,
    dir: Option<TempDir>,
}

impl TestContext {
    /// Fresh in-memory vault.
    pub fn new() -> Self {
        Self {
            repo: SqliteRepository::open_in_memory().expect("open in-memory vault"),
            dir: None,
        }
    }

    /// Fresh file-backed vault in a temporary directory.
    pub fn on_disk() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = SqliteRepository::open(dir.path().join("vault.db")).expect("open vault file");
        Self {
            repo,
            dir: Some(dir),
        }
    }

    /// Path of the backing database file, if any.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.path().join("vault.db"))
    }

    /// Drop the current connection and open the same file again.
    pub fn reopen(&mut self) {
        let path = self.db_path().expect("reopen needs an on-disk vault");
        self.repo = SqliteRepository::open(path).expect("reopen vault file");
    }

    /// Import a generated word list with `num_words` entries.
    pub fn import_sample(&self, num_words: usize) -> commands::ImportResult {
        let mut file = tempfile::NamedTempFile::new().expect("create word list");
        write!(file, "{}", fixtures::sample_word_list(num_words)).expect("write word list");
        commands::import_file(&self.repo, file.path(), now()).expect("import word list")
    }
}
