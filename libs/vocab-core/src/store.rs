//! Record store contract.

use crate::types::VocabularyRecord;
use std::convert::Infallible;

/// Storage for vocabulary records, keyed by `word`.
///
/// `update` replaces the stored record with the same word as a whole; it
/// never partially applies.
pub trait RecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All records, in the store's stable order.
    fn get_all(&self) -> Result<Vec<VocabularyRecord>, Self::Error>;

    /// Replace the stored record with the same word.
    fn update(&mut self, record: &VocabularyRecord) -> Result<(), Self::Error>;

    /// Remove a record. Returns whether it existed.
    fn remove(&mut self, word: &str) -> Result<bool, Self::Error>;
}

/// In-memory store that keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<VocabularyRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<VocabularyRecord>) -> Self {
        Self { records }
    }

    /// Insert or replace by word.
    pub fn insert(&mut self, record: VocabularyRecord) {
        match self.records.iter_mut().find(|r| r.word == record.word) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn get(&self, word: &str) -> Option<&VocabularyRecord> {
        self.records.iter().find(|r| r.word == word)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    type Error = Infallible;

    fn get_all(&self) -> Result<Vec<VocabularyRecord>, Self::Error> {
        Ok(self.records.clone())
    }

    fn update(&mut self, record: &VocabularyRecord) -> Result<(), Self::Error> {
        // Updates never create records.
        if let Some(existing) = self.records.iter_mut().find(|r| r.word == record.word) {
            *existing = record.clone();
        }
        Ok(())
    }

    fn remove(&mut self, word: &str) -> Result<bool, Self::Error> {
        let before = self.records.len();
        self.records.retain(|r| r.word != word);
        Ok(self.records.len() != before)
    }
}
