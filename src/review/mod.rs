//! Interactive review of consolidated error groups.
//!
//! The session moves between four states:
//!
//! - paginating: a window of groups is listed and the operator picks one,
//!   backs up (`b`) or moves on (`n`);
//! - inspecting a group: its occurrences are listed for selection, except a
//!   single-occurrence group which goes straight to editing;
//! - editing an occurrence: the operator types a replacement (or `n`) and
//!   confirms it with `y`/`n`;
//! - done, once the last window is left with `n`.
//!
//! Everything runs on the calling thread and blocks on operator input.

pub mod correction;
pub mod pagination;

use crate::cli::output::{bound_message, format_group_list, format_occurrences};
use crate::cli::prompt::Console;
use crate::{Result, SpellingError, SpellingErrorGroup};
use correction::FileUpdater;
use pagination::Paginator;
use std::collections::HashSet;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The operator is finished with this window.
    Done,
    /// Rewind the walk and show earlier groups.
    Backup,
}

pub struct ReviewSession<'a, R, W> {
    console: &'a mut Console<R, W>,
    updater: &'a dyn FileUpdater,
    page_size: usize,
    corrections: usize,
}

impl<'a, R: BufRead, W: Write> ReviewSession<'a, R, W> {
    pub fn new(console: &'a mut Console<R, W>, updater: &'a dyn FileUpdater, page_size: usize) -> Self {
        Self {
            console,
            updater,
            page_size,
            corrections: 0,
        }
    }

    /// Corrections written to disk so far.
    pub fn corrections(&self) -> usize {
        self.corrections
    }

    /// Walk every group window by window until the operator leaves the last
    /// one. Returns the number of corrections applied.
    pub fn review(&mut self, groups: &mut [SpellingErrorGroup]) -> Result<usize> {
        let total = groups.len();
        let mut pages = Paginator::new(total, self.page_size);

        while let Some(window) = pages.next_page() {
            let words_seen = window.end;
            match self.review_page(words_seen, total, &mut groups[window])? {
                PageOutcome::Backup => pages.backup(),
                PageOutcome::Done => {}
            }
        }

        Ok(self.corrections)
    }

    /// Show one window until the operator moves on or backs up.
    pub fn review_page(
        &mut self,
        words_seen: usize,
        total: usize,
        page: &mut [SpellingErrorGroup],
    ) -> Result<PageOutcome> {
        let mut investigated = HashSet::new();
        let prompt = format!(
            "\nSeen {} words out of {}. Enter number to investigate, 'b' to backup, or 'n' to skip. >> ",
            words_seen, total
        );

        loop {
            self.console.say("\n---")?;
            let listing = format_group_list(page, &investigated, self.console.colored);
            self.console.say(listing)?;

            let selection = self.console.ask(&prompt)?;
            if selection.eq_ignore_ascii_case("n") {
                return Ok(PageOutcome::Done);
            }
            if selection.eq_ignore_ascii_case("b") {
                return Ok(PageOutcome::Backup);
            }

            match selection.parse::<usize>() {
                Ok(index) if index < page.len() => {
                    self.inspect_group(&mut page[index])?;
                    investigated.insert(index);
                }
                _ => self.console.say(bound_message(page.len()))?,
            }
        }
    }

    /// Let the operator pick occurrences of one group to correct.
    pub fn inspect_group(&mut self, group: &mut SpellingErrorGroup) -> Result<()> {
        if group.len() == 1 {
            return self.edit_occurrence(&mut group.errors[0]);
        }
        if group.is_empty() {
            return Ok(());
        }

        self.console.say(format!(
            "\n---\n\nYou chose to investigate '{}'. Here are appearances of it...",
            group.word
        ))?;

        loop {
            let listing = format_occurrences(group, self.console.colored);
            self.console.say(listing)?;

            let selection = self
                .console
                .ask("\nEnter number to correct, otherwise enter 'n'. >> ")?;
            if selection.eq_ignore_ascii_case("n") {
                return Ok(());
            }

            match selection.parse::<usize>() {
                Ok(index) if index < group.len() => {
                    self.edit_occurrence(&mut group.errors[index])?;
                    self.console.say("\n---")?;
                }
                _ => self.console.say(bound_message(group.len()))?,
            }
        }
    }

    /// Ask for a replacement and confirmation, then apply it.
    pub fn edit_occurrence(&mut self, error: &mut SpellingError) -> Result<()> {
        loop {
            self.console.say(format!(
                "\nThe suspect word, '{}', appears in \n\t'{}'",
                error.word(),
                error.line().trim()
            ))?;

            let correction = self
                .console
                .ask("\nTell me how to fix, or enter 'n' to continue. >> ")?;
            if correction.eq_ignore_ascii_case("n") {
                return Ok(());
            }
            if correction.is_empty() {
                continue;
            }

            let question = format!(
                "\nYou want to replace '{}' with '{}'. Enter 'y' or 'n'. >> ",
                error.word(),
                correction
            );
            loop {
                let verification = self.console.ask(&question)?;
                if verification.eq_ignore_ascii_case("y") {
                    return self.apply(error, &correction);
                }
                if verification.eq_ignore_ascii_case("n") {
                    self.console.say("\nOkay, I'll ask you again.")?;
                    break;
                }
                self.console
                    .say("\nI didn't understand your input. Please try again.\n---")?;
            }
        }
    }

    /// Splice the replacement into the line as it is on disk now, then
    /// update the in-memory record from what was written. A failed write is
    /// reported and the record left as it was.
    fn apply(&mut self, error: &mut SpellingError, replacement: &str) -> Result<()> {
        let written = self.updater.replace_word(
            error.file(),
            error.line_number(),
            error.word(),
            replacement,
        );

        match written {
            Ok(line) => {
                error.record_correction(replacement, line);
                self.corrections += 1;
                log::info!(
                    "corrected {}:{} to '{}'",
                    error.file().display(),
                    error.line_number(),
                    replacement
                );
                self.console.say(format!(
                    "\nUpdated {}:{}",
                    error.file().display(),
                    error.line_number()
                ))
            }
            Err(e) => {
                log::warn!("correction failed: {}", e);
                self.console
                    .say(format!("\nI couldn't update the file: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use super::correction::DiskUpdater;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    /// Pretends every line of every file reads `source` until written.
    struct Recorder {
        source: String,
        writes: RefCell<Vec<(PathBuf, usize, String)>>,
    }

    impl Recorder {
        fn new(source: &str) -> Self {
            Self {
                source: source.to_string(),
                writes: RefCell::new(Vec::new()),
            }
        }
    }

    impl FileUpdater for Recorder {
        fn replace_word(
            &self,
            file: &Path,
            line_number: usize,
            word: &str,
            replacement: &str,
        ) -> Result<String> {
            let current = self
                .writes
                .borrow()
                .iter()
                .rev()
                .find(|(f, n, _)| f == file && *n == line_number)
                .map(|(_, _, line)| line.clone())
                .unwrap_or_else(|| self.source.clone());
            let line = crate::splice_word(&current, word, replacement).ok_or_else(|| {
                Error::TokenNotFound {
                    file: file.to_path_buf(),
                    word: word.to_string(),
                    line_number,
                }
            })?;
            self.writes
                .borrow_mut()
                .push((file.to_path_buf(), line_number, line.clone()));
            Ok(line)
        }
    }

    struct Broken;

    impl FileUpdater for Broken {
        fn replace_word(
            &self,
            file: &Path,
            _line_number: usize,
            _word: &str,
            _replacement: &str,
        ) -> Result<String> {
            Err(Error::io(
                file,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false)
    }

    fn group(word: &str, n: usize) -> SpellingErrorGroup {
        SpellingErrorGroup::new(
            word,
            (1..=n)
                .map(|i| SpellingError::new("doc.md", word, format!("the {} fox", word), i))
                .collect(),
        )
    }

    fn groups(n: usize) -> Vec<SpellingErrorGroup> {
        (0..n).map(|i| group(&format!("wrod{}", i), 2)).collect()
    }

    fn transcript(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_single_occurrence_goes_straight_to_editing() {
        let mut console = console("qwik\n");
        let recorder = Recorder::new("the qwik fox");
        let mut g = group("qwik", 1);
        {
            let mut session = ReviewSession::new(&mut console, &recorder, 10);
            let _ = session.inspect_group(&mut g);
        }
        let out = transcript(console);
        assert!(out.contains("The suspect word, 'qwik', appears in"));
        assert!(!out.contains("Here are appearances"));
        assert!(!out.contains("0 -- "));
    }

    #[test]
    fn test_correction_flow_updates_record_and_file() {
        let mut console = console("quick\ny\n");
        let recorder = Recorder::new("the qwik fox");
        let mut g = group("qwik", 1);
        {
            let mut session = ReviewSession::new(&mut console, &recorder, 10);
            session.inspect_group(&mut g).unwrap();
            assert_eq!(session.corrections(), 1);
        }

        assert_eq!(g.errors[0].word(), "quick");
        assert_eq!(g.errors[0].line(), "the quick fox");
        assert_eq!(
            recorder.writes.borrow().as_slice(),
            &[(PathBuf::from("doc.md"), 1, "the quick fox".to_string())]
        );
    }

    #[test]
    fn test_declined_then_unclear_confirmation() {
        // n re-asks for a replacement; gibberish re-asks the confirmation
        let mut console = console("quik\nn\nquick\nmaybe\ny\n");
        let recorder = Recorder::new("the qwik fox");
        let mut error = SpellingError::new("doc.md", "qwik", "the qwik fox", 7);
        {
            let mut session = ReviewSession::new(&mut console, &recorder, 10);
            session.edit_occurrence(&mut error).unwrap();
        }
        assert_eq!(error.word(), "quick");
        assert_eq!(recorder.writes.borrow().len(), 1);

        let out = transcript(console);
        assert!(out.contains("Okay, I'll ask you again."));
        assert!(out.contains("I didn't understand your input."));
        assert_eq!(out.matches("Enter 'y' or 'n'").count(), 3);
    }

    #[test]
    fn test_skip_leaves_occurrence_unchanged() {
        let mut console = console("N\n");
        let recorder = Recorder::new("the qwik fox");
        let mut error = SpellingError::new("doc.md", "qwik", "the qwik fox", 1);
        {
            let mut session = ReviewSession::new(&mut console, &recorder, 10);
            session.edit_occurrence(&mut error).unwrap();
        }
        assert_eq!(error.word(), "qwik");
        assert!(recorder.writes.borrow().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_record_and_continues() {
        let mut console = console("quick\ny\n");
        let mut error = SpellingError::new("doc.md", "qwik", "the qwik fox", 1);
        {
            let mut session = ReviewSession::new(&mut console, &Broken, 10);
            session.edit_occurrence(&mut error).unwrap();
            assert_eq!(session.corrections(), 0);
        }
        assert_eq!(error.word(), "qwik");
        assert!(transcript(console).contains("I couldn't update the file"));
    }

    #[test]
    fn test_group_index_selection_and_bounds() {
        let mut console = console("5\nx\n1\nfixed\ny\nn\n");
        let recorder = Recorder::new("the wrod fox");
        let mut g = group("wrod", 3);
        {
            let mut session = ReviewSession::new(&mut console, &recorder, 10);
            session.inspect_group(&mut g).unwrap();
        }
        assert_eq!(g.errors[1].word(), "fixed");
        assert_eq!(g.errors[0].word(), "wrod");

        let out = transcript(console);
        assert!(out.contains("You chose to investigate 'wrod'"));
        assert_eq!(
            out.matches("Your input must be an integer between 0 and 2").count(),
            2
        );
    }

    #[test]
    fn test_page_marks_investigated() {
        let mut console = console("0\nn\nn\n");
        let recorder = Recorder::new("");
        let mut page = groups(2);
        {
            let mut session = ReviewSession::new(&mut console, &recorder, 10);
            let outcome = session.review_page(2, 2, &mut page).unwrap();
            assert_eq!(outcome, PageOutcome::Done);
        }
        let out = transcript(console);
        assert!(out.contains("0 -- wrod0 <-- [investigated]"));
        assert!(out.contains("Seen 2 words out of 2."));
    }

    #[test]
    fn test_page_rejects_out_of_bounds() {
        let mut console = console("2\nb\n");
        let recorder = Recorder::new("");
        let mut page = groups(2);
        let mut session = ReviewSession::new(&mut console, &recorder, 10);
        assert_eq!(
            session.review_page(2, 2, &mut page).unwrap(),
            PageOutcome::Backup
        );
    }

    #[test]
    fn test_review_walks_pages_with_backup() {
        // pages of 2 over 5 groups: [0,2) [2,4) b -> [0,2) [2,4) [4,5)
        let mut console = console("n\nb\nn\nn\nn\n");
        let recorder = Recorder::new("");
        let mut all = groups(5);
        {
            let mut session = ReviewSession::new(&mut console, &recorder, 2);
            assert_eq!(session.review(&mut all).unwrap(), 0);
        }
        let out = transcript(console);
        let seen: Vec<&str> = out
            .match_indices("Seen ")
            .map(|(i, _)| &out[i..i + 7])
            .collect();
        assert_eq!(seen, vec!["Seen 2 ", "Seen 4 ", "Seen 2 ", "Seen 4 ", "Seen 5 "]);
    }

    #[test]
    fn test_closed_input_unwinds() {
        let mut console = console("");
        let recorder = Recorder::new("");
        let mut all = groups(3);
        let mut session = ReviewSession::new(&mut console, &recorder, 2);
        assert!(matches!(session.review(&mut all), Err(Error::InputClosed)));
    }

    #[test]
    fn test_corrections_on_one_line_accumulate_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "teh recieve\nlast\n").unwrap();

        let mut all = vec![
            SpellingErrorGroup::new(
                "recieve",
                vec![SpellingError::new(&path, "recieve", "teh recieve", 1)],
            ),
            SpellingErrorGroup::new("teh", vec![SpellingError::new(&path, "teh", "teh recieve", 1)]),
        ];
        let mut console = console("1\nthe\ny\n0\nreceive\ny\nn\n");
        {
            let mut session = ReviewSession::new(&mut console, &DiskUpdater, 10);
            assert_eq!(session.review(&mut all).unwrap(), 2);
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "the receive\nlast\n");
        assert_eq!(all[0].errors[0].line(), "the receive");
        assert_eq!(all[1].errors[0].word(), "the");
    }

    #[test]
    fn test_same_word_twice_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "teh teh\n").unwrap();

        let mut g = SpellingErrorGroup::new(
            "teh",
            vec![
                SpellingError::new(&path, "teh", "teh teh", 1),
                SpellingError::new(&path, "teh", "teh teh", 1),
            ],
        );
        let mut console = console("0\nthe\ny\n1\nthe\ny\nn\n");
        {
            let mut session = ReviewSession::new(&mut console, &DiskUpdater, 10);
            session.inspect_group(&mut g).unwrap();
            assert_eq!(session.corrections(), 2);
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "the the\n");
        assert_eq!(g.errors[1].line(), "the the");
    }
}
