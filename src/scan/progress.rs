use colored::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters shared by every scan worker for one run.
#[derive(Debug)]
pub struct ScanProgress {
    files_read: AtomicUsize,
    suspects_found: AtomicUsize,
    total_files: usize,
    interval: usize,
    started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub suspects_found: usize,
    pub files_read: usize,
    pub total_files: usize,
    pub elapsed: Duration,
}

impl ScanProgress {
    pub fn new(total_files: usize, interval: usize) -> Self {
        Self {
            files_read: AtomicUsize::new(0),
            suspects_found: AtomicUsize::new(0),
            total_files,
            interval: interval.max(1),
            started: Instant::now(),
        }
    }

    /// Count one finished file; returns the new total.
    pub fn file_done(&self) -> usize {
        self.files_read.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn suspect_found(&self) {
        self.suspects_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn files_read(&self) -> usize {
        self.files_read.load(Ordering::Acquire)
    }

    pub fn suspects_found(&self) -> usize {
        self.suspects_found.load(Ordering::Acquire)
    }

    /// Report every `interval` files and on the last one.
    pub fn should_report(&self, files_read: usize) -> bool {
        files_read % self.interval == 0 || files_read == self.total_files
    }

    pub fn snapshot(&self, files_read: usize) -> ProgressSnapshot {
        ProgressSnapshot {
            suspects_found: self.suspects_found(),
            files_read,
            total_files: self.total_files,
            elapsed: self.started.elapsed(),
        }
    }
}

impl ProgressSnapshot {
    pub fn status_line(&self) -> String {
        format!(
            "Suspicious Words: {} --- Files Read: {} out of {} --- In {:.2} seconds",
            self.suspects_found,
            self.files_read,
            self.total_files,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Receives status updates from scan workers. Called concurrently.
pub trait StatusReporter: Send + Sync {
    fn report(&self, snapshot: &ProgressSnapshot);
}

pub struct ConsoleReporter {
    pub colored: bool,
}

impl StatusReporter for ConsoleReporter {
    fn report(&self, snapshot: &ProgressSnapshot) {
        let line = snapshot.status_line();
        if self.colored {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

/// Drops every update.
pub struct Silent;

impl StatusReporter for Silent {
    fn report(&self, _snapshot: &ProgressSnapshot) {}
}
