//! Parley Ingest - Transcript reading and topic chunking.
//!
//! This crate provides:
//! - Transcript discovery and parsing (Word documents, plain text)
//! - Reader strategies for the four question conventions and a sniffer choosing between them
//! - The segmenter building one QA table from a folder
//! - Lexical and TF-IDF boundary detection and chunk aggregation
//! - CSV output
//!
//! The three entry points [`read`], [`segment`] and [`save`] run the whole pipeline.

mod chunker;
mod discover;
mod error;
mod output;
mod parallel;
mod parsers;
mod readers;
mod segmenter;
mod similarity;
mod sniffer;

pub use chunker::{
    aggregate, assign_chunk_ids, build_detector, tokenize_pairs, BoundaryDetector, Chunker,
    CosineDetector, LexicalDetector,
};
pub use discover::{discover_documents, DiscoveryFilter};
pub use error::{IngestError, IngestResult};
pub use output::{load_pairs, save_chunks, save_pairs};
pub use parallel::Schedule;
pub use parsers::{parse_file, DocumentParser, DocxParser, TextParser};
pub use readers::{leading_label, Extraction, Reader};
pub use segmenter::{extract_file, Segmenter};
pub use similarity::{
    cosine_similarity, jaccard_distance, SparseVector, TfidfSpace, COSINE_SIMILARITY_THRESHOLD,
    LEXICAL_DISTANCE_THRESHOLD,
};
pub use sniffer::{sniff, SniffScores, SNIFF_WINDOW};

use parley_config::Config;
use parley_core::{BoundaryStrategy, ChunkedCorpus, Corpus};
use parley_process::Preprocessor;
use std::path::Path;

/// Read every transcript under `folder` into one QA table.
pub fn read(folder: &Path, config: &Config) -> IngestResult<Corpus> {
    Segmenter::from_config(config).read(folder)
}

/// Chunk a QA table with the given strategy and per-file vocabulary.
pub fn segment(
    corpus: &Corpus,
    strategy: BoundaryStrategy,
    preprocessor: &dyn Preprocessor,
) -> IngestResult<ChunkedCorpus> {
    Chunker::new(strategy).segment(corpus, preprocessor)
}

/// Write the chunk table as CSV.
pub fn save(chunked: &ChunkedCorpus, path: &Path) -> IngestResult<()> {
    save_chunks(chunked, path)
}
