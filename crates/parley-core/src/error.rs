//! Error types for Parley.

use thiserror::Error;

/// Core error type for Parley operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Token sequences are misaligned: {questions} question rows, {answers} answer rows")]
    Alignment { questions: usize, answers: usize },

    #[error("Expected {expected} chunk ids, got {actual}")]
    ChunkIdCount { expected: usize, actual: usize },
}

/// Result type alias using Parley's Error.
pub type Result<T> = std::result::Result<T, Error>;
