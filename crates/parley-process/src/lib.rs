//! Parley Process - Linguistic preprocessing for transcript text.
//!
//! This crate provides:
//! - The `Preprocessor` contract: a batch of strings in, index-aligned token rows out
//! - `LinguisticPipeline`, which strips comments, tokenizes, drops stopwords,
//!   standardizes colloquialisms, lemmatizes and keeps only selected parts of speech
//!
//! Linguistic resources are plain text files loaded once into `Lexicons`.

mod error;
mod lexicons;
mod pipeline;

pub use error::{ProcessError, ProcessResult};
pub use lexicons::Lexicons;
pub use pipeline::{strip_comments, tokenize, LinguisticPipeline, Preprocessor};
