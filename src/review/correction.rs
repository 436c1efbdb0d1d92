use crate::{splice_word, Error, Result};
use std::fs;
use std::path::Path;

/// Writes an accepted correction back to the scanned tree.
pub trait FileUpdater {
    /// Replace the first case-insensitive `word` on the 1-based
    /// `line_number` of `file` as the file reads now, keeping the line's
    /// terminator. Returns the rewritten line without its terminator.
    fn replace_word(
        &self,
        file: &Path,
        line_number: usize,
        word: &str,
        replacement: &str,
    ) -> Result<String>;
}

/// Read-all then write-all. No recovery if the write fails midway.
pub struct DiskUpdater;

impl FileUpdater for DiskUpdater {
    fn replace_word(
        &self,
        file: &Path,
        line_number: usize,
        word: &str,
        replacement: &str,
    ) -> Result<String> {
        let content = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
        let lines: Vec<&str> = content.split_inclusive('\n').collect();

        let index = line_number
            .checked_sub(1)
            .filter(|i| *i < lines.len())
            .ok_or_else(|| Error::LineOutOfRange {
                file: file.to_path_buf(),
                line_number,
            })?;

        let target = lines[index];
        let body = target.trim_end_matches(['\n', '\r']);
        let new_line = splice_word(body, word, replacement).ok_or_else(|| Error::TokenNotFound {
            file: file.to_path_buf(),
            word: word.to_string(),
            line_number,
        })?;

        let mut updated = String::with_capacity(content.len() + replacement.len());
        for (i, line) in lines.iter().enumerate() {
            if i == index {
                updated.push_str(&new_line);
                updated.push_str(&target[body.len()..]);
            } else {
                updated.push_str(line);
            }
        }

        fs::write(file, updated).map_err(|e| Error::io(file, e))?;
        Ok(new_line)
    }
}
