//! Word (.docx) transcript parser.
//!
//! A .docx file is a ZIP archive of XML parts; `docx-rs` gives a typed tree:
//!
//! ```text
//! Document -> Paragraph -> Run -> Text
//!                       \-> Hyperlink -> Run -> Text
//! ```
//!
//! Run-level italic/bold flags and paragraph-level numbering are folded into
//! one `StyleFlags` per paragraph here, so readers never touch docx types.

use super::DocumentParser;
use crate::error::{IngestError, IngestResult};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use parley_core::{Document, Paragraph, StyleFlags};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parser for Word documents.
pub struct DocxParser;

impl DocxParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse an in-memory .docx archive. `path` is only used for errors and provenance.
    pub fn parse_bytes(&self, path: &Path, bytes: &[u8]) -> IngestResult<Document> {
        let docx = read_docx(bytes).map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            message: format!("{:?}", e),
        })?;

        let paragraphs: Vec<Paragraph> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(convert_paragraph(para)),
                _ => None,
            })
            .collect();

        debug!("Parsed {} paragraphs from {}", paragraphs.len(), path.display());
        Ok(Document::new(path, paragraphs))
    }
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for DocxParser {
    fn parse(&self, path: &Path) -> IngestResult<Document> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        self.parse_bytes(path, &bytes)
    }

    fn extensions(&self) -> &[&str] {
        &["docx"]
    }
}

fn convert_paragraph(para: &docx_rs::Paragraph) -> Paragraph {
    let mut text = String::new();
    let mut style = StyleFlags::default();
    collect_runs(&para.children, &mut text, &mut style);

    let props = serde_json::to_value(&para.property).unwrap_or(Value::Null);
    style.list_item = has_numbering(&props) || has_list_style(&props);

    Paragraph::new(text).with_style(style)
}

/// Append the text of every run, including runs nested in hyperlinks.
fn collect_runs(children: &[ParagraphChild], text: &mut String, style: &mut StyleFlags) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        _ => {}
                    }
                }

                let props = serde_json::to_value(&run.run_property).unwrap_or(Value::Null);
                style.italic |= flag_enabled(&props, "italic");
                style.bold |= flag_enabled(&props, "bold");
            }
            ParagraphChild::Hyperlink(link) => collect_runs(&link.children, text, style),
            _ => {}
        }
    }
}

/// Toggle properties serialize as `true`/`false` when present and `null` or absent otherwise.
fn flag_enabled(props: &Value, key: &str) -> bool {
    match props.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(on)) => *on,
        Some(_) => true,
    }
}

fn has_numbering(props: &Value) -> bool {
    ["numberingProperty", "numbering_property"]
        .iter()
        .any(|key| props.get(*key).map(|v| !v.is_null()).unwrap_or(false))
}

fn has_list_style(props: &Value) -> bool {
    props
        .get("style")
        .and_then(Value::as_str)
        .map(|style| style.to_lowercase().contains("list"))
        .unwrap_or(false)
}
