//! Quiz session grading.

use crate::algorithm::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::matching::{is_correct_answer, position_for_question};
use crate::store::RecordStore;
use crate::types::{QuizQuestion, VocabularyRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub was_correct: bool,
    /// Matched vocabulary word, if any.
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SchedulingResult>,
}

/// Summary of a graded quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub results: Vec<QuestionResult>,
    pub correct: usize,
    pub total: usize,
}

impl SessionReport {
    /// Questions that could not be tied to any saved word.
    pub fn unmatched(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.word.is_none())
            .map(|r| r.question_id.as_str())
            .collect()
    }

    /// Scheduling results in the order they were applied.
    pub fn updates(&self) -> impl Iterator<Item = &SchedulingResult> {
        self.results.iter().filter_map(|r| r.scheduling.as_ref())
    }
}

/// Grade a quiz and persist each record update as soon as it is computed.
///
/// A store error aborts the rest of the session; updates already written
/// stay written.
pub fn grade_session<S, A>(
    store: &mut S,
    algorithm: &A,
    questions: &[QuizQuestion],
    answers: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<SessionReport, S::Error>
where
    S: RecordStore + ?Sized,
    A: SpacedRepetitionAlgorithm + ?Sized,
{
    let mut records = store.get_all()?;
    grade_into(&mut records, algorithm, questions, answers, now, |result| {
        store.update(&result.record)
    })
}

/// Grade against an in-memory record list without persisting.
///
/// `records` is updated in place so it reflects the post-session state.
pub fn grade_records<A>(
    records: &mut [VocabularyRecord],
    algorithm: &A,
    questions: &[QuizQuestion],
    answers: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> SessionReport
where
    A: SpacedRepetitionAlgorithm + ?Sized,
{
    let graded: Result<SessionReport, std::convert::Infallible> =
        grade_into(records, algorithm, questions, answers, now, |_| Ok(()));
    match graded {
        Ok(report) => report,
        Err(never) => match never {},
    }
}

/// Grade a quiz, handing every scheduling result to `persist` as soon as
/// it is computed.
///
/// The first `persist` error stops grading and is returned.
pub fn grade_into<A, E, F>(
    records: &mut [VocabularyRecord],
    algorithm: &A,
    questions: &[QuizQuestion],
    answers: &HashMap<String, String>,
    now: DateTime<Utc>,
    mut persist: F,
) -> Result<SessionReport, E>
where
    A: SpacedRepetitionAlgorithm + ?Sized,
    F: FnMut(&SchedulingResult) -> Result<(), E>,
{
    let mut report = SessionReport {
        total: questions.len(),
        ..Default::default()
    };

    for question in questions {
        let submitted = answers.get(&question.id).map(String::as_str);
        let was_correct = is_correct_answer(submitted, &question.correct_answer);
        if was_correct {
            report.correct += 1;
        }

        let (word, scheduling) = match position_for_question(records, question) {
            Some(index) => {
                // A word tested twice builds on its first update.
                let slot = &mut records[index];
                let result = algorithm.record_outcome(slot, was_correct, now);
                persist(&result)?;
                *slot = result.record.clone();
                (Some(slot.word.clone()), Some(result))
            }
            None => (None, None),
        };

        report.results.push(QuestionResult {
            question_id: question.id.clone(),
            was_correct,
            word,
            scheduling,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::IntervalLadder;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use std::fmt;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 2, 19, 0, 0).unwrap()
    }

    fn q(id: &str, prompt: &str, answer: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            question: prompt.into(),
            options: vec![],
            correct_answer: answer.into(),
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn record(word: &str, level: u32) -> VocabularyRecord {
        let mut r = VocabularyRecord::new(word, "", now() - Duration::days(1));
        r.mastery_level = level;
        r
    }

    #[test]
    fn unmatched_question_is_skipped() {
        let mut store = MemoryStore::new(vec![record("pragmatic", 1)]);
        let questions = vec![
            q("1", "What does pragmatic mean?", "practical"),
            q("2", "Opposite of hot?", "cold"),
        ];
        let report = grade_session(
            &mut store,
            &IntervalLadder::default(),
            &questions,
            &answers(&[("1", "practical"), ("2", "cold")]),
            now(),
        )
        .unwrap();

        assert_eq!(report.updates().count(), 1);
        assert_eq!(report.unmatched(), vec!["2"]);
        assert_eq!(report.correct, 2);
        assert_eq!(report.total, 2);
        assert_eq!(store.get("pragmatic").unwrap().mastery_level, 2);
    }

    #[test]
    fn wrong_answer_resets_stored_record() {
        let mut store = MemoryStore::new(vec![record("tenacious", 3)]);
        let questions = vec![q("1", "tenacious means?", "persistent")];
        let report = grade_session(
            &mut store,
            &IntervalLadder::default(),
            &questions,
            &answers(&[("1", "Persistent")]),
            now(),
        )
        .unwrap();

        assert!(!report.results[0].was_correct);
        let stored = store.get("tenacious").unwrap();
        assert_eq!(stored.mastery_level, 0);
        assert_eq!(stored.next_review_at, now() + Duration::days(1));
    }

    #[test]
    fn missing_answer_counts_as_wrong() {
        let mut store = MemoryStore::new(vec![record("verbose", 2)]);
        let questions = vec![q("1", "verbose means?", "wordy")];
        let report = grade_session(
            &mut store,
            &IntervalLadder::default(),
            &questions,
            &HashMap::new(),
            now(),
        )
        .unwrap();
        assert_eq!(report.correct, 0);
        assert_eq!(store.get("verbose").unwrap().mastery_level, 0);
    }

    #[test]
    fn repeated_word_builds_on_first_update() {
        let mut records = vec![record("innate", 0)];
        let questions = vec![
            q("1", "innate means?", "inborn"),
            q("2", "Use innate in a sentence", "b"),
        ];
        let report = grade_records(
            &mut records,
            &IntervalLadder::default(),
            &questions,
            &answers(&[("1", "inborn"), ("2", "b")]),
            now(),
        );
        let levels: Vec<_> = report
            .updates()
            .map(|u| (u.previous_level, u.record.mastery_level))
            .collect();
        assert_eq!(levels, vec![(0, 1), (1, 2)]);
        assert_eq!(records[0].mastery_level, 2);
    }

    #[test]
    fn question_is_tied_to_first_matching_record() {
        let mut records = vec![record("act", 0), record("react", 0)];
        let questions = vec![q("1", "How did they react?", "quickly")];
        let report = grade_records(
            &mut records,
            &IntervalLadder::default(),
            &questions,
            &answers(&[("1", "quickly")]),
            now(),
        );
        assert_eq!(report.results[0].word.as_deref(), Some("act"));
        assert_eq!(records[1].mastery_level, 0);
    }

    #[derive(Debug)]
    struct StoreDown;

    impl fmt::Display for StoreDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("store unavailable")
        }
    }

    impl std::error::Error for StoreDown {}

    /// Accepts a fixed number of writes, then fails.
    struct FlakyStore {
        inner: MemoryStore,
        writes_left: usize,
    }

    impl RecordStore for FlakyStore {
        type Error = StoreDown;

        fn get_all(&self) -> Result<Vec<VocabularyRecord>, StoreDown> {
            Ok(self.inner.get_all().unwrap_or_default())
        }

        fn update(&mut self, record: &VocabularyRecord) -> Result<(), StoreDown> {
            if self.writes_left == 0 {
                return Err(StoreDown);
            }
            self.writes_left -= 1;
            let _ = self.inner.update(record);
            Ok(())
        }

        fn remove(&mut self, word: &str) -> Result<bool, StoreDown> {
            Ok(self.inner.remove(word).unwrap_or(false))
        }
    }

    #[test]
    fn store_failure_keeps_earlier_updates() {
        let mut store = FlakyStore {
            inner: MemoryStore::new(vec![record("astute", 0), record("brevity", 0)]),
            writes_left: 1,
        };
        let questions = vec![q("1", "astute?", "shrewd"), q("2", "brevity?", "shortness")];
        let result = grade_session(
            &mut store,
            &IntervalLadder::default(),
            &questions,
            &answers(&[("1", "shrewd"), ("2", "shortness")]),
            now(),
        );

        assert!(result.is_err());
        assert_eq!(store.inner.get("astute").unwrap().mastery_level, 1);
        assert_eq!(store.inner.get("brevity").unwrap().mastery_level, 0);
    }
}
