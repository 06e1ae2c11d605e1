//! Matching quiz questions and answers back to vocabulary.
//!
//! Questions do not carry the word they test, so the grader finds it by
//! substring containment. This can misfire when one saved word is part of
//! another ("act" inside "react"); the first record in store order wins.
//! Generated questions should eventually carry an explicit word id.

use crate::types::{QuizQuestion, VocabularyRecord};

/// Find the record a question tests.
///
/// A record matches if its word appears (ignoring case) in the prompt, in
/// any option, or in the expected answer. Records are tried in order.
pub fn find_record_for_question<'a>(
    records: &'a [VocabularyRecord],
    question: &QuizQuestion,
) -> Option<&'a VocabularyRecord> {
    position_for_question(records, question).map(|i| &records[i])
}

/// Index of the record a question tests, see [`find_record_for_question`].
pub fn position_for_question(records: &[VocabularyRecord], question: &QuizQuestion) -> Option<usize> {
    let prompt = question.question.to_lowercase();
    let options: Vec<String> = question.options.iter().map(|o| o.to_lowercase()).collect();
    let answer = question.correct_answer.to_lowercase();

    records.iter().position(|record| {
        let word = record.word.to_lowercase();
        if word.is_empty() {
            return false;
        }
        prompt.contains(&word) || options.iter().any(|o| o.contains(&word)) || answer.contains(&word)
    })
}

/// Exact string equality between the submitted and expected answer.
///
/// No case or whitespace normalization: "Apple" and "apple " are both
/// wrong for "apple". Generated quizzes are multiple choice, so the
/// submitted text is normally copied verbatim from an option.
pub fn is_correct_answer(submitted: Option<&str>, expected: &str) -> bool {
    submitted == Some(expected)
}
