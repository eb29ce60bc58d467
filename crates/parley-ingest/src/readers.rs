//! Question/answer extraction strategies.
//!
//! Every transcript convention boils down to one question: does this paragraph
//! start a new question? The four conventions are a closed set, so they are
//! variants of one enum sharing a single extraction pass.

use crate::error::{IngestError, IngestResult};
use once_cell::sync::Lazy;
use parley_core::{Document, Paragraph, QaPair, ReaderKind};
use regex::Regex;
use std::path::Path;
use tracing::warn;

/// Speaker label at the start of a paragraph, e.g. `Q:` or `Anketar:`.
static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+:").expect("Failed to compile speaker label pattern"));

/// The speaker label a paragraph begins with, if any. Indented text has none.
pub fn leading_label(text: &str) -> Option<&str> {
    LABEL.find(text).map(|m| m.as_str())
}

/// Questions and answers of one document, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn into_pairs(self, file: &Path) -> Vec<QaPair> {
        self.questions
            .into_iter()
            .zip(self.answers)
            .map(|(q, a)| QaPair::new(file, q, a))
            .collect()
    }
}

/// A question-start predicate plus the data it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reader {
    /// Questions begin with the label found on the first paragraph.
    Label { label: String },
    /// Questions contain an italic run.
    Italic,
    /// Questions contain a bold run.
    Bold,
    /// Questions are list items.
    List,
}

impl Reader {
    /// Build the reader for a sniffed kind.
    pub fn for_kind(kind: ReaderKind, document: &Document) -> IngestResult<Self> {
        match kind {
            ReaderKind::Label => Self::label_from(document),
            ReaderKind::Italic => Ok(Reader::Italic),
            ReaderKind::Bold => Ok(Reader::Bold),
            ReaderKind::List => Ok(Reader::List),
        }
    }

    /// Derive the question label from the first non-empty paragraph.
    pub fn label_from(document: &Document) -> IngestResult<Self> {
        document
            .non_empty()
            .next()
            .and_then(|p| leading_label(&p.text))
            .map(|label| Reader::Label {
                label: label.to_string(),
            })
            .ok_or_else(|| IngestError::UnrecognizedLabel {
                path: document.path.clone(),
            })
    }

    pub fn kind(&self) -> ReaderKind {
        match self {
            Reader::Label { .. } => ReaderKind::Label,
            Reader::Italic => ReaderKind::Italic,
            Reader::Bold => ReaderKind::Bold,
            Reader::List => ReaderKind::List,
        }
    }

    pub fn is_question_start(&self, paragraph: &Paragraph) -> bool {
        match self {
            Reader::Label { label } => paragraph.text.starts_with(label.as_str()),
            Reader::Italic => paragraph.style.italic,
            Reader::Bold => paragraph.style.bold,
            Reader::List => paragraph.style.list_item,
        }
    }

    /// Split the document into questions and the answers that follow them.
    ///
    /// Empty paragraphs are ignored. Text before the first question has no
    /// question to belong to and is dropped. A question followed directly by
    /// another question gets an empty answer.
    pub fn extract(&self, document: &Document) -> Extraction {
        let mut extraction = Extraction::default();
        let mut buffer: Vec<&str> = Vec::new();
        let mut preamble = 0usize;

        for paragraph in document.non_empty() {
            if self.is_question_start(paragraph) {
                if !extraction.questions.is_empty() {
                    extraction.answers.push(buffer.join("\n"));
                }
                buffer.clear();
                extraction.questions.push(paragraph.text.clone());
            } else if extraction.questions.is_empty() {
                preamble += 1;
            } else {
                buffer.push(&paragraph.text);
            }
        }

        if !extraction.questions.is_empty() {
            extraction.answers.push(buffer.join("\n"));
        }

        if preamble > 0 {
            warn!(
                "Dropped {} paragraphs before the first question in {}",
                preamble,
                document.path.display()
            );
        }

        extraction
    }

    /// Extract and attach the document path to every pair.
    pub fn extract_pairs(&self, document: &Document) -> Vec<QaPair> {
        self.extract(document).into_pairs(&document.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(paragraphs: Vec<Paragraph>) -> Document {
        Document::new("interview.docx", paragraphs)
    }

    #[test]
    fn test_label_reader_scenario() {
        let document = doc(vec![
            Paragraph::new("Q: a?"),
            Paragraph::new("answer one."),
            Paragraph::new("Q: b?"),
            Paragraph::new("totally unrelated answer."),
        ]);

        let reader = Reader::label_from(&document).unwrap();
        assert_eq!(
            reader,
            Reader::Label {
                label: "Q:".to_string()
            }
        );

        let pairs = reader.extract_pairs(&document);
        assert_eq!(
            pairs,
            vec![
                QaPair::new("interview.docx", "Q: a?", "answer one."),
                QaPair::new("interview.docx", "Q: b?", "totally unrelated answer."),
            ]
        );
    }

    #[test]
    fn test_label_reader_skips_empty_paragraphs() {
        let document = doc(vec![
            Paragraph::new(""),
            Paragraph::new("I: Kje ste živeli?"),
            Paragraph::new("  "),
            Paragraph::new("Na vasi."),
            Paragraph::new(""),
            Paragraph::new("Pri starih starših."),
            Paragraph::new("I: Koliko časa?"),
        ]);

        let extraction = Reader::label_from(&document).unwrap().extract(&document);
        assert_eq!(extraction.questions, vec!["I: Kje ste živeli?", "I: Koliko časa?"]);
        assert_eq!(extraction.answers, vec!["Na vasi.\nPri starih starših.", ""]);
    }

    #[test]
    fn test_label_must_match_exactly() {
        let document = doc(vec![
            Paragraph::new("Q: first?"),
            Paragraph::new("A: reply"),
            Paragraph::new("Question: not a label match?"),
        ]);

        let extraction = Reader::label_from(&document).unwrap().extract(&document);
        assert_eq!(extraction.len(), 1);
        assert_eq!(extraction.answers[0], "A: reply\nQuestion: not a label match?");
    }

    #[test]
    fn test_indented_label_is_answer_text() {
        let document = doc(vec![
            Paragraph::new("Q: a?"),
            Paragraph::new("answer one."),
            Paragraph::new("  Q: b?"),
            Paragraph::new("Q: c?"),
        ]);

        let extraction = Reader::label_from(&document).unwrap().extract(&document);
        assert_eq!(extraction.questions, vec!["Q: a?", "Q: c?"]);
        assert_eq!(extraction.answers, vec!["answer one.\n  Q: b?", ""]);

        let indented_first = doc(vec![Paragraph::new("  Q: a?"), Paragraph::new("Q: b?")]);
        assert!(matches!(
            Reader::label_from(&indented_first),
            Err(IngestError::UnrecognizedLabel { .. })
        ));
    }

    #[test]
    fn test_preamble_is_dropped() {
        let document = doc(vec![
            Paragraph::new("Transcribed 1998."),
            Paragraph::new("Side A."),
            Paragraph::new("Q: a?"),
            Paragraph::new("yes."),
        ]);

        let extraction = Reader::Label {
            label: "Q:".to_string(),
        }
        .extract(&document);
        assert_eq!(extraction.questions, vec!["Q: a?"]);
        assert_eq!(extraction.answers, vec!["yes."]);
    }

    #[test]
    fn test_unrecognized_label() {
        let document = doc(vec![Paragraph::new("No label here"), Paragraph::new("Q: late")]);
        assert!(matches!(
            Reader::label_from(&document),
            Err(IngestError::UnrecognizedLabel { .. })
        ));
        assert!(matches!(
            Reader::for_kind(ReaderKind::Label, &document),
            Err(IngestError::UnrecognizedLabel { .. })
        ));
    }

    #[test]
    fn test_style_readers() {
        let document = doc(vec![
            Paragraph::new("Intro by the archivist."),
            Paragraph::new("Where were you born?").italic(),
            Paragraph::new("In Celje."),
            Paragraph::new("A small town."),
            Paragraph::new("And school?").italic().bold(),
            Paragraph::new("Gimnazija."),
        ]);

        let italic = Reader::Italic.extract(&document);
        assert_eq!(italic.questions, vec!["Where were you born?", "And school?"]);
        assert_eq!(italic.answers, vec!["In Celje.\nA small town.", "Gimnazija."]);

        let bold = Reader::Bold.extract(&document);
        assert_eq!(bold.questions, vec!["And school?"]);
        assert_eq!(bold.answers, vec!["Gimnazija."]);
    }

    #[test]
    fn test_list_reader() {
        let document = doc(vec![
            Paragraph::new("What did you do?").list_item(),
            Paragraph::new("Farming."),
            Paragraph::new("Anything else?").list_item(),
        ]);

        let extraction = Reader::List.extract(&document);
        assert_eq!(extraction.questions.len(), extraction.answers.len());
        assert_eq!(extraction.answers, vec!["Farming.", ""]);
    }

    #[test]
    fn test_no_questions_gives_empty_extraction() {
        let document = doc(vec![Paragraph::new("just text"), Paragraph::new("more text")]);
        let extraction = Reader::Bold.extract(&document);
        assert!(extraction.is_empty());
        assert!(extraction.answers.is_empty());
    }

    #[test]
    fn test_leading_label() {
        assert_eq!(leading_label("Q: hi"), Some("Q:"));
        assert_eq!(leading_label("Spraševalka: kje?"), Some("Spraševalka:"));
        assert_eq!(leading_label("  Spraševalka: kje?"), None);
        assert_eq!(leading_label("Q : hi"), None);
        assert_eq!(leading_label("hello"), None);
    }
}
