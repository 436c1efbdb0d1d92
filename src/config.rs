use crate::Error;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".spellsweep.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub dictionary: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,

    /// Files handed to each scan worker.
    pub files_per_worker: usize,
    /// Scan thread pool size; `None` uses one thread per CPU.
    pub worker_threads: Option<usize>,
    pub review_page_size: usize,
    pub status_print_interval: usize,
    /// Minimum number of occurrences a word needs to be reported.
    pub noise_threshold: usize,

    pub extensions: Vec<String>,
    pub reserved_words: Vec<String>,
    pub ignore_patterns: Vec<String>,

    pub respect_gitignore: bool,
    pub include_hidden: bool,
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en_US".to_string(),
            dictionary: None,
            personal_dictionary: None,
            files_per_worker: 100,
            worker_threads: None,
            review_page_size: 10,
            status_print_interval: 50,
            noise_threshold: 5,
            extensions: ["py", "md", "markdown", "rst"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reserved_words: PYTHON_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: vec![
                r"[0-9]".to_string(), // numbers and tokens like sha256
            ],
            respect_gitignore: true,
            include_hidden: false,
        }
    }
}

/// Values given on the command line; they win over every file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub language: Option<String>,
    pub dictionary: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub files_per_worker: Option<usize>,
    pub worker_threads: Option<usize>,
    pub review_page_size: Option<usize>,
    pub noise_threshold: Option<usize>,
    pub extensions: Vec<String>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = overrides
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        } else if overrides.config_file.is_some() {
            anyhow::bail!("Config file not found: {}", local_path.display());
        }

        config.apply(overrides);

        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // other's values override self's if they differ from defaults
        let defaults = Self::default();

        if other.language != defaults.language {
            self.language = other.language;
        }
        if other.dictionary.is_some() {
            self.dictionary = other.dictionary;
        }
        if other.personal_dictionary.is_some() {
            self.personal_dictionary = other.personal_dictionary;
        }
        if other.files_per_worker != defaults.files_per_worker {
            self.files_per_worker = other.files_per_worker;
        }
        if other.worker_threads.is_some() {
            self.worker_threads = other.worker_threads;
        }
        if other.review_page_size != defaults.review_page_size {
            self.review_page_size = other.review_page_size;
        }
        if other.status_print_interval != defaults.status_print_interval {
            self.status_print_interval = other.status_print_interval;
        }
        if other.noise_threshold != defaults.noise_threshold {
            self.noise_threshold = other.noise_threshold;
        }
        if other.extensions != defaults.extensions {
            self.extensions = other.extensions;
        }
        if other.reserved_words != defaults.reserved_words {
            self.reserved_words = other.reserved_words;
        }
        if other.ignore_patterns != defaults.ignore_patterns {
            self.ignore_patterns = other.ignore_patterns;
        }
        self.respect_gitignore = other.respect_gitignore;
        self.include_hidden = other.include_hidden;
        self
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if overrides.dictionary.is_some() {
            self.dictionary = overrides.dictionary;
        }
        if overrides.personal_dictionary.is_some() {
            self.personal_dictionary = overrides.personal_dictionary;
        }
        if let Some(n) = overrides.files_per_worker {
            self.files_per_worker = n;
        }
        if overrides.worker_threads.is_some() {
            self.worker_threads = overrides.worker_threads;
        }
        if let Some(n) = overrides.review_page_size {
            self.review_page_size = n;
        }
        if let Some(n) = overrides.noise_threshold {
            self.noise_threshold = n;
        }
        if !overrides.extensions.is_empty() {
            self.extensions = overrides.extensions;
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        let positive = [
            ("files_per_worker", self.files_per_worker),
            ("review_page_size", self.review_page_size),
            ("status_print_interval", self.status_print_interval),
            ("noise_threshold", self.noise_threshold),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be at least 1", key)));
            }
        }
        if self.worker_threads == Some(0) {
            return Err(Error::InvalidConfig(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `path` has one of the configured extensions.
    pub fn wants(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellsweep").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellsweep").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellsweep").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
