//! Error types for linguistic preprocessing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for preprocessing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors that can occur while loading resources or preprocessing text.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Malformed line {line} in {path}: {message}")]
    Resource {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Preprocessor returned {actual} rows for {expected} inputs")]
    Misaligned { expected: usize, actual: usize },
}
