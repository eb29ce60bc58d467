//! Plain text and lightweight-markup transcript parser.
//!
//! Each line is one paragraph. Markup is turned into style flags and removed:
//! a leading `-`, `*`, `•` or `1.` marker makes a list item, `**…**` or `__…__`
//! makes the paragraph bold, and `*…*` or `_…_` makes it italic.

use super::DocumentParser;
use crate::error::{IngestError, IngestResult};
use once_cell::sync::Lazy;
use parley_core::{Document, Paragraph, StyleFlags};
use regex::Regex;
use std::path::Path;

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("Failed to compile list marker pattern")
});

static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("Failed to compile bold span pattern")
});

static ITALIC_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*(.+?)\*|\b_(.+?)_\b").expect("Failed to compile italic span pattern")
});

/// Parser for `.txt` and `.md` transcripts.
pub struct TextParser;

impl TextParser {
    pub fn new() -> Self {
        Self
    }

    /// Build the paragraph model from raw text.
    pub fn parse_str(&self, path: &Path, content: &str) -> Document {
        let paragraphs = content.lines().map(parse_line).collect();
        Document::new(path, paragraphs)
    }
}

impl Default for TextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for TextParser {
    fn parse(&self, path: &Path) -> IngestResult<Document> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Ok(self.parse_str(path, &content))
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text", "md", "markdown"]
    }
}

fn parse_line(line: &str) -> Paragraph {
    let mut style = StyleFlags::default();
    let mut text = line.trim_end().to_string();

    if let Some(marker) = LIST_MARKER.find(&text) {
        style.list_item = true;
        text = text[marker.end()..].to_string();
    }

    if BOLD_SPAN.is_match(&text) {
        style.bold = true;
        text = BOLD_SPAN.replace_all(&text, "$1$2").into_owned();
    }

    if ITALIC_SPAN.is_match(&text) {
        style.italic = true;
        text = ITALIC_SPAN.replace_all(&text, "$1$2").into_owned();
    }

    Paragraph::new(text).with_style(style)
}
