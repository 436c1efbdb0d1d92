pub mod checker;
pub mod cli;
pub mod config;
pub mod consolidate;
pub mod dict;
pub mod error;
pub mod parser;
pub mod review;
pub mod scan;

pub use checker::SpellChecker;
pub use config::Config;
pub use error::{Error, Result};

use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// One occurrence of a suspected misspelling.
///
/// `file` and `line_number` identify the occurrence and never change.
/// `word` and `line` follow any correction applied during review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellingError {
    file: PathBuf,
    word: String,
    line: String,
    line_number: usize,
}

impl SpellingError {
    pub fn new(
        file: impl Into<PathBuf>,
        word: impl Into<String>,
        line: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            file: file.into(),
            word: word.into(),
            line: line.into(),
            line_number,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-based.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Byte range of the first case-insensitive match of `word` in `line`.
    pub fn word_span(&self) -> Option<Range<usize>> {
        find_word(&self.line, &self.word)
    }

    /// The line as it reads once `replacement` is spliced over `word`.
    pub fn corrected_line(&self, replacement: &str) -> Result<String> {
        splice_word(&self.line, &self.word, replacement).ok_or_else(|| Error::TokenNotFound {
            file: self.file.clone(),
            word: self.word.clone(),
            line_number: self.line_number,
        })
    }

    /// Splices `replacement` into the stored line and takes it as the new word.
    pub fn apply_correction(&mut self, replacement: &str) -> Result<()> {
        let line = self.corrected_line(replacement)?;
        self.record_correction(replacement, line);
        Ok(())
    }

    /// Takes `line` as written back to the file.
    pub fn record_correction(&mut self, replacement: &str, line: impl Into<String>) {
        self.line = line.into();
        self.word = replacement.to_string();
    }
}

/// Byte range of the first ASCII case-insensitive match of `word` in `line`.
pub fn find_word(line: &str, word: &str) -> Option<Range<usize>> {
    if word.is_empty() {
        return None;
    }
    // ASCII lowercasing keeps byte offsets intact.
    let start = line
        .to_ascii_lowercase()
        .find(&word.to_ascii_lowercase())?;
    Some(start..start + word.len())
}

/// `line` with its first case-insensitive `word` replaced.
pub fn splice_word(line: &str, word: &str, replacement: &str) -> Option<String> {
    let span = find_word(line, word)?;
    let mut spliced = String::with_capacity(line.len() + replacement.len());
    spliced.push_str(&line[..span.start]);
    spliced.push_str(replacement);
    spliced.push_str(&line[span.end..]);
    Some(spliced)
}

/// Every occurrence of one distinct suspect word, keyed by its lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellingErrorGroup {
    pub word: String,
    pub errors: Vec<SpellingError>,
}

impl SpellingErrorGroup {
    pub fn new(word: impl Into<String>, errors: Vec<SpellingError>) -> Self {
        Self {
            word: word.into(),
            errors,
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
