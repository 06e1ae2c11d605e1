//! Test fixtures and factory functions for creating test data.

use std::collections::HashMap;

use vocab_core::QuizQuestion;

/// Generate a word list with `num_words` entries named word1, word2, ...
///
/// Every other entry is a noun; the rest are verbs.
pub fn sample_word_list(num_words: usize) -> String {
    (0..num_words)
        .map(|i| {
            let pos = if i % 2 == 0 { "noun" } else { "verb" };
            format!(
                "Word: word{}\nMeaning: meaning {}\nPOS: {}\n",
                i + 1,
                i + 1,
                pos
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A multiple-choice question whose prompt names `word`.
pub fn question_about(id: &str, word: &str, answer: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        question: format!("What is the best definition of \"{word}\"?"),
        options: vec![answer.to_string(), "something else".to_string()],
        correct_answer: answer.to_string(),
    }
}

/// A question that mentions no saved word.
pub fn unrelated_question(id: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        question: "Choose the correct article: ___ hour".to_string(),
        options: vec!["a".to_string(), "an".to_string()],
        correct_answer: "an".to_string(),
    }
}

pub fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(id, answer)| (id.to_string(), answer.to_string()))
        .collect()
}
