//! Word-list parser for bulk vault imports.
//!
//! # Format
//! ```text
//! Word: ubiquitous
//! Meaning: present, appearing, or found everywhere
//! POS: adjective
//! Example: Smartphones have become ubiquitous.
//!
//! Word: mitigate
//! Meaning: make less severe
//! or painful.
//! ```
//!
//! `Word:` starts an entry. `POS:` and `Example:` are optional; lines
//! without a prefix continue the previous field.

use crate::error::{ParseError, Result};
use crate::types::RawWord;
use std::collections::HashSet;

/// Parse word-list content into raw words.
pub fn parse(content: &str) -> Result<Vec<RawWord>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::new();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Meaning,
    PartOfSpeech,
    Example,
}

enum LineType<'a> {
    Word(&'a str),
    Field(Field, &'a str),
    Text(&'a str),
    Empty,
}

struct WordBuilder {
    word: String,
    meaning: Option<String>,
    part_of_speech: Option<String>,
    example: Option<String>,
    start_line: usize,
}

impl WordBuilder {
    fn new(word: &str, start_line: usize) -> Self {
        Self {
            word: word.to_string(),
            meaning: None,
            part_of_speech: None,
            example: None,
            start_line,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Meaning => &mut self.meaning,
            Field::PartOfSpeech => &mut self.part_of_speech,
            Field::Example => &mut self.example,
        }
    }

    fn build(self) -> Result<RawWord> {
        let meaning = self
            .meaning
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ParseError::MissingMeaning {
                word: self.word.clone(),
                line: self.start_line,
            })?;

        Ok(RawWord {
            word: self.word,
            meaning,
            part_of_speech: self.part_of_speech.unwrap_or_default().trim().to_string(),
            example: self.example.unwrap_or_default().trim().to_string(),
            line_number: self.start_line,
        })
    }
}

struct Parser {
    current: Option<WordBuilder>,
    current_field: Option<Field>,
    words: Vec<RawWord>,
    seen: HashSet<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            current_field: None,
            words: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("Word:") {
            LineType::Word(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Meaning:") {
            LineType::Field(Field::Meaning, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("POS:") {
            LineType::Field(Field::PartOfSpeech, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Example:") {
            LineType::Field(Field::Example, rest.trim())
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(trimmed)
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Word(word) => self.start_word(word, line_num)?,
            LineType::Field(field, text) => self.start_field(field, text, line_num)?,
            LineType::Text(text) => self.continue_field(text),
            LineType::Empty => self.current_field = None,
        }
        Ok(())
    }

    fn start_word(&mut self, word: &str, line_num: usize) -> Result<()> {
        self.flush()?;
        if word.is_empty() {
            return Err(ParseError::EmptyWord { line: line_num });
        }
        if !self.seen.insert(word.to_lowercase()) {
            return Err(ParseError::DuplicateWord {
                word: word.to_string(),
                line: line_num,
            });
        }
        self.current = Some(WordBuilder::new(word, line_num));
        Ok(())
    }

    fn start_field(&mut self, field: Field, text: &str, line_num: usize) -> Result<()> {
        let Some(builder) = self.current.as_mut() else {
            return Err(ParseError::OrphanField {
                field: field_name(field),
                line: line_num,
            });
        };
        *builder.slot(field) = Some(text.to_string());
        self.current_field = Some(field);
        Ok(())
    }

    fn continue_field(&mut self, text: &str) {
        // Stray text outside any field is ignored, like markdown headings.
        let (Some(builder), Some(field)) = (self.current.as_mut(), self.current_field) else {
            return;
        };
        match builder.slot(field) {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(text);
            }
            slot => *slot = Some(text.to_string()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.current_field = None;
        if let Some(builder) = self.current.take() {
            self.words.push(builder.build()?);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<RawWord>> {
        self.flush()?;
        Ok(self.words)
    }
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Meaning => "Meaning:",
        Field::PartOfSpeech => "POS:",
        Field::Example => "Example:",
    }
}
