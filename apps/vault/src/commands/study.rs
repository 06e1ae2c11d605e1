//! Study session commands.
//!
//! A session is two calls: `start_quiz` picks the words and hands them to
//! the external question generator, `submit_quiz` grades the generated
//! questions against the user's answers.

use super::settings::load_algorithm;
use super::Result;
use crate::db::{ReviewLogEntry, ReviewLogRepository, SettingsRepository, SqliteRepository};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use vocab_core::{
    grade_into, select_candidates, CategoryFilter, QuizQuestion, RecordStore, SessionReport,
    VocabularyRecord,
};

#[derive(Debug, Clone, Default)]
pub struct QuizRequest {
    /// Defaults to the stored quiz size.
    pub count: Option<usize>,
    pub category: Option<CategoryFilter>,
}

/// Words chosen for a quiz, in presentation order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QuizPlan {
    pub requested: usize,
    pub due: usize,
    pub words: Vec<VocabularyRecord>,
}

/// Generated quiz as produced by the question generator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

pub fn start_quiz<R: Rng + ?Sized>(
    repo: &SqliteRepository,
    request: &QuizRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<QuizPlan> {
    let requested = match request.count {
        Some(count) => count,
        None => repo.get_settings()?.quiz_size as usize,
    };

    let records = repo.get_all()?;
    let words = select_candidates(&records, requested, request.category.as_ref(), now, rng)?;
    let due = words.iter().filter(|r| r.is_due(now)).count();

    info!(requested, selected = words.len(), due, "selected quiz words");
    Ok(QuizPlan {
        requested,
        due,
        words,
    })
}

/// Grade a generated quiz. Each matched word is rescheduled, written and
/// logged before the next question is looked at.
pub fn submit_quiz(
    repo: &mut SqliteRepository,
    quiz: &Quiz,
    answers: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<SessionReport> {
    let algorithm = load_algorithm(repo)?;
    let mut records = repo.get_all()?;

    let report = grade_into(&mut records, &algorithm, &quiz.questions, answers, now, |result| {
        repo.update(&result.record)?;
        repo.insert_review(&ReviewLogEntry::from_result(result, now))?;
        debug!(
            word = %result.record.word,
            correct = result.was_correct,
            from = result.previous_level,
            to = result.record.mastery_level,
            "rescheduled word"
        );
        Ok::<_, crate::db::DbError>(())
    })?;

    for question_id in report.unmatched() {
        warn!(question_id, "question does not mention any saved word; skipped");
    }
    info!(
        correct = report.correct,
        total = report.total,
        updated = report.updates().count(),
        "graded quiz"
    );
    Ok(report)
}
