//! Quiz candidate selection.
//!
//! Due words are always drilled first; not-due words only top up a quiz
//! that would otherwise be short. Both pools are shuffled so the same
//! subset is not drilled every session.

use crate::error::SelectionError;
use crate::types::VocabularyRecord;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which descriptive field a category filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    #[default]
    PartOfSpeech,
    Meaning,
    Word,
}

/// Case-insensitive substring filter over one descriptive field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub field: CategoryField,
    pub needle: String,
}

impl CategoryFilter {
    pub fn new(field: CategoryField, needle: impl Into<String>) -> Self {
        Self {
            field,
            needle: needle.into(),
        }
    }

    pub fn part_of_speech(needle: impl Into<String>) -> Self {
        Self::new(CategoryField::PartOfSpeech, needle)
    }

    pub fn matches(&self, record: &VocabularyRecord) -> bool {
        let haystack = match self.field {
            CategoryField::PartOfSpeech => &record.part_of_speech,
            CategoryField::Meaning => &record.meaning,
            CategoryField::Word => &record.word,
        };
        haystack
            .to_lowercase()
            .contains(&self.needle.to_lowercase())
    }
}

/// Pick up to `desired_count` records, due ones first.
///
/// The result length is `min(desired_count, filtered pool size)`. A filter
/// that matches nothing is an error rather than a silent fallback to the
/// whole vault.
pub fn select_candidates<R: Rng + ?Sized>(
    records: &[VocabularyRecord],
    desired_count: usize,
    filter: Option<&CategoryFilter>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<VocabularyRecord>, SelectionError> {
    let pool: Vec<&VocabularyRecord> = match filter {
        Some(f) => {
            let matched: Vec<_> = records.iter().filter(|r| f.matches(r)).collect();
            if matched.is_empty() {
                return Err(SelectionError::EmptyCandidatePool {
                    category: f.needle.clone(),
                });
            }
            matched
        }
        None => records.iter().collect(),
    };

    let (mut due, mut not_due): (Vec<_>, Vec<_>) = pool.into_iter().partition(|r| r.is_due(now));

    due.shuffle(rng);
    let mut selection: Vec<VocabularyRecord> =
        due.into_iter().take(desired_count).cloned().collect();

    let remaining = desired_count - selection.len();
    if remaining > 0 {
        not_due.shuffle(rng);
        selection.extend(not_due.into_iter().take(remaining).cloned());
    }

    Ok(selection)
}
