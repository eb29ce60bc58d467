//! Document parsers producing the paragraph model.

mod docx;
mod text;

pub use self::docx::DocxParser;
pub use self::text::TextParser;

use crate::error::{IngestError, IngestResult};
use parley_core::Document;
use std::path::Path;

/// Trait for document parsers.
pub trait DocumentParser: Send + Sync {
    /// Parse a file at the given path.
    fn parse(&self, path: &Path) -> IngestResult<Document>;

    /// Get the supported file extensions.
    fn extensions(&self) -> &[&str];

    /// Check if this parser supports the given extension.
    fn supports(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Parse a file based on its extension.
pub fn parse_file(path: &Path) -> IngestResult<Document> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let docx_parser = DocxParser::new();
    if docx_parser.supports(extension) {
        return docx_parser.parse(path);
    }

    let text_parser = TextParser::new();
    if text_parser.supports(extension) {
        return text_parser.parse(path);
    }

    Err(IngestError::UnsupportedFileType(extension.to_string()))
}
