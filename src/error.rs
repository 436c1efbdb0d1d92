use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("dictionary lookup failed for '{word}': {reason}")]
    Lookup { word: String, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{word}' no longer appears on line {line_number} of {}", file.display())]
    TokenNotFound {
        file: PathBuf,
        word: String,
        line_number: usize,
    },

    #[error("{} has no line {line_number}", file.display())]
    LineOutOfRange { file: PathBuf, line_number: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to start scan workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("input stream closed")]
    InputClosed,

    #[error("console I/O failed: {0}")]
    Console(#[from] std::io::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
