//! Error types for the ingestion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while reading, extracting or chunking transcripts.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] parley_config::ConfigError),

    #[error("Preprocessing error: {0}")]
    Preprocess(#[from] parley_process::ProcessError),

    #[error("{0}")]
    Core(#[from] parley_core::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Parse error for {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("No question label found in the first paragraph of {path}")]
    UnrecognizedLabel { path: PathBuf },

    #[error("No label, italic, bold or list structure detected in {path}")]
    UnreadableDocument { path: PathBuf },

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
