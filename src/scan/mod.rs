pub mod progress;

use crate::checker::tokenizer::split_line;
use crate::consolidate::{consolidate, Consolidation};
use crate::parser::{FileType, LineFilter};
use crate::{Config, Error, Result, SpellChecker, SpellingError};
use ignore::WalkBuilder;
use progress::{ScanProgress, StatusReporter};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Collect every regular file under `root` whose extension is configured,
/// in one walk. Sorted so partitioning is stable between runs.
pub fn discover_files(root: &Path, config: &Config) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(!config.include_hidden)
        .ignore(config.respect_gitignore)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .parents(config.respect_gitignore)
        .require_git(false)
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
                if is_file && config.wants(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => log::warn!("skipping unreadable entry: {}", e),
        }
    }

    files.sort();
    files
}

/// Outcome of discovering, scanning and consolidating one tree.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub files_checked: usize,
    pub result: Consolidation,
}

/// Discover, scan and consolidate everything under `root`.
pub fn sweep(
    root: &Path,
    checker: &SpellChecker,
    reporter: &dyn StatusReporter,
    config: &Config,
) -> Result<Sweep> {
    let files = discover_files(root, config);
    log::info!("sweeping {} files under {}", files.len(), root.display());

    let errors = Scanner::new(checker, reporter, config).scan(&files, config.files_per_worker)?;

    Ok(Sweep {
        files_checked: files.len(),
        result: consolidate(errors, config.noise_threshold),
    })
}

/// Fans files out over scan workers and gathers their suspects.
pub struct Scanner<'a> {
    checker: &'a SpellChecker,
    reporter: &'a dyn StatusReporter,
    status_print_interval: usize,
    worker_threads: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(checker: &'a SpellChecker, reporter: &'a dyn StatusReporter, config: &Config) -> Self {
        Self {
            checker,
            reporter,
            status_print_interval: config.status_print_interval,
            worker_threads: config.worker_threads,
        }
    }

    /// Partition `files` into chunks of at most `files_per_worker`, scan each
    /// chunk on its own worker, and merge once every worker has finished.
    ///
    /// Within one file, errors follow line order.
    pub fn scan(&self, files: &[PathBuf], files_per_worker: usize) -> Result<Vec<SpellingError>> {
        let progress = ScanProgress::new(files.len(), self.status_print_interval);
        let chunk_size = files_per_worker.max(1);

        let run = || {
            files
                .par_chunks(chunk_size)
                .map(|chunk| self.scan_chunk(chunk, &progress))
                .collect::<Vec<Vec<SpellingError>>>()
        };

        let per_worker = match self.worker_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(run),
            None => run(),
        };

        log::debug!(
            "scanned {} files with {} workers, {} suspects",
            progress.files_read(),
            per_worker.len(),
            progress.suspects_found()
        );

        Ok(per_worker.into_iter().flatten().collect())
    }

    fn scan_chunk(&self, chunk: &[PathBuf], progress: &ScanProgress) -> Vec<SpellingError> {
        let mut errors = Vec::new();

        for path in chunk {
            if let Err(e) = self.scan_file(path, progress, &mut errors) {
                log::warn!("skipping {}: {}", path.display(), e);
            }

            let files_read = progress.file_done();
            if progress.should_report(files_read) {
                self.reporter.report(&progress.snapshot(files_read));
            }
        }

        errors
    }

    fn scan_file(
        &self,
        path: &Path,
        progress: &ScanProgress,
        errors: &mut Vec<SpellingError>,
    ) -> Result<()> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut reader = BufReader::new(file);
        let mut filter = LineFilter::new(FileType::from_path(path));
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| Error::io(path, e))?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if !filter.should_scan(line) {
                continue;
            }

            for token in split_line(line) {
                match self.checker.is_suspect(&token) {
                    Ok(true) => {
                        errors.push(SpellingError::new(path, token, line, line_number));
                        progress.suspect_found();
                    }
                    Ok(false) => {}
                    Err(e) => log::warn!(
                        "could not classify '{}' at {}:{}: {}",
                        token,
                        path.display(),
                        line_number,
                        e
                    ),
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::progress::{ProgressSnapshot, Silent};
    use super::*;
    use crate::checker::dictionary::Dictionary;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    fn checker() -> SpellChecker {
        let dict = Dictionary::from_words(["the", "data", "we", "read", "here", "receive"]).unwrap();
        SpellChecker::new(Arc::new(dict), &Config::default())
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<ProgressSnapshot>>);

    impl StatusReporter for Collect {
        fn report(&self, snapshot: &ProgressSnapshot) {
            self.0.lock().unwrap().push(*snapshot);
        }
    }

    #[test]
    fn test_discover_filters_extensions() {
        let dir = tempfile::Builder::new().prefix("tree").tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pkg/sub")).unwrap();
        fs::write(dir.path().join("README.md"), "hi").unwrap();
        fs::write(dir.path().join("pkg/mod.py"), "# hi").unwrap();
        fs::write(dir.path().join("pkg/sub/guide.rst"), "hi").unwrap();
        fs::write(dir.path().join("pkg/sub/data.json"), "{}").unwrap();

        let files = discover_files(dir.path(), &Config::default());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("pkg/mod.py"),
                PathBuf::from("pkg/sub/guide.rst"),
            ]
        );
    }

    #[test]
    fn test_scan_only_comment_lines_in_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mod.py");
        fs::write(&path, "# we recieve the data\nrecieve = 1\n").unwrap();

        let checker = checker();
        let config = Config::default();
        let scanner = Scanner::new(&checker, &Silent, &config);
        let errors = scanner.scan(&[path.clone()], 10).unwrap();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word(), "recieve");
        assert_eq!(errors[0].line(), "# we recieve the data");
        assert_eq!(errors[0].line_number(), 1);
        assert_eq!(errors[0].file(), path.as_path());
    }

    #[test]
    fn test_scan_across_workers_keeps_line_order() {
        let dir = tempdir().unwrap();
        let mut files = Vec::new();
        for i in 0..5 {
            let path = dir.path().join(format!("notes{}.md", i));
            fs::write(&path, "teh data\nwe read here\nteh end\n").unwrap();
            files.push(path);
        }
        files.push(dir.path().join("missing.md"));

        let checker = checker();
        let config = Config {
            status_print_interval: 2,
            worker_threads: Some(2),
            ..Default::default()
        };
        let reporter = Collect::default();
        let scanner = Scanner::new(&checker, &reporter, &config);
        let errors = scanner.scan(&files, 2).unwrap();

        let teh: Vec<_> = errors.iter().filter(|e| e.word() == "teh").collect();
        assert_eq!(teh.len(), 10);
        assert!(errors.iter().any(|e| e.word() == "end"));
        for file in &files[..5] {
            let lines: Vec<usize> = errors
                .iter()
                .filter(|e| e.file() == file.as_path() && e.word() == "teh")
                .map(|e| e.line_number())
                .collect();
            assert_eq!(lines, vec![1, 3]);
        }

        let snapshots = reporter.0.lock().unwrap();
        assert_eq!(snapshots.len(), 3);
        assert!(snapshots.iter().any(|s| s.files_read == 6));
        assert!(snapshots.iter().all(|s| s.total_files == 6));
    }
}
