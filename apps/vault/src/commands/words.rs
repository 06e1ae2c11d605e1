//! Word management commands.

use super::{CommandError, Result};
use crate::db::{SqliteRepository, WordRepository};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tracing::info;
use vocab_core::{parser, CategoryFilter, RecordStore, VocabularyRecord};

#[derive(Debug, Clone, Default)]
pub struct AddWord {
    pub word: String,
    pub meaning: String,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImportResult {
    pub parsed: usize,
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub due_only: bool,
    pub category: Option<CategoryFilter>,
}

/// Save a new word, due immediately.
pub fn add_word(repo: &SqliteRepository, request: AddWord, now: DateTime<Utc>) -> Result<VocabularyRecord> {
    let word = request.word.trim();
    if word.is_empty() {
        return Err(CommandError::InvalidInput("word must not be empty".into()));
    }

    let record = VocabularyRecord::new(word, request.meaning.trim(), now)
        .with_part_of_speech(request.part_of_speech.unwrap_or_default().trim())
        .with_example(request.example.unwrap_or_default().trim());
    repo.insert_word(&record)?;

    info!(word = %record.word, "saved word");
    Ok(record)
}

/// Import a word-list file. Words already in the vault are skipped.
pub fn import_file(repo: &SqliteRepository, path: &Path, now: DateTime<Utc>) -> Result<ImportResult> {
    let content = fs::read_to_string(path)?;
    let raw_words = parser::parse(&content)?;
    let parsed = raw_words.len();

    let records: Vec<VocabularyRecord> = raw_words.into_iter().map(|w| w.into_record(now)).collect();
    let imported = repo.insert_words(&records)?;

    info!(file = %path.display(), parsed, imported, "imported word list");
    Ok(ImportResult {
        parsed,
        imported,
        skipped: parsed - imported,
    })
}

pub fn list_words(
    repo: &SqliteRepository,
    filter: &ListFilter,
    now: DateTime<Utc>,
) -> Result<Vec<VocabularyRecord>> {
    let records = repo
        .get_all()?
        .into_iter()
        .filter(|r| !filter.due_only || r.is_due(now))
        .filter(|r| filter.category.as_ref().map_or(true, |c| c.matches(r)))
        .collect();
    Ok(records)
}

pub fn remove_word(repo: &mut SqliteRepository, word: &str) -> Result<()> {
    if !repo.remove(word)? {
        return Err(CommandError::NotFound(format!("word \"{word}\"")));
    }
    info!(word, "removed word");
    Ok(())
}
