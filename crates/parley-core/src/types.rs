//! Core domain types for Parley.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Per-file chunk identifier. Starts at 0 and grows by at most 1 per QA pair.
pub type ChunkId = usize;

/// Style information precomputed for a paragraph at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleFlags {
    /// At least one run is italic.
    pub italic: bool,
    /// At least one run is bold.
    pub bold: bool,
    /// The paragraph is a numbered or bulleted list item.
    pub list_item: bool,
}

/// A single paragraph of a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub style: StyleFlags,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StyleFlags::default(),
        }
    }

    pub fn with_style(mut self, style: StyleFlags) -> Self {
        self.style = style;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style.italic = true;
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn list_item(mut self) -> Self {
        self.style.list_item = true;
        self
    }

    /// Whether the paragraph carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A loaded transcript: its source path and paragraphs in document order.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            path: path.into(),
            paragraphs,
        }
    }

    /// Paragraphs with visible text, in order.
    pub fn non_empty(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter().filter(|p| !p.is_empty())
    }
}

/// Structural convention used to mark where a question starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderKind {
    Label,
    Italic,
    Bold,
    List,
}

impl ReaderKind {
    /// All kinds, highest tie-break priority first.
    pub const PRIORITY: [ReaderKind; 4] = [
        ReaderKind::Label,
        ReaderKind::Italic,
        ReaderKind::Bold,
        ReaderKind::List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReaderKind::Label => "label",
            ReaderKind::Italic => "italic",
            ReaderKind::Bold => "bold",
            ReaderKind::List => "list",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "label" => Some(ReaderKind::Label),
            "italic" => Some(ReaderKind::Italic),
            "bold" => Some(ReaderKind::Bold),
            "list" => Some(ReaderKind::List),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One extracted question and the answer text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    #[serde(rename = "File")]
    pub file: PathBuf,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
}

impl QaPair {
    pub fn new(
        file: impl Into<PathBuf>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Question followed by answer, newline separated. An empty answer adds no line.
    pub fn content(&self) -> String {
        if self.answer.is_empty() {
            self.question.clone()
        } else {
            format!("{}\n{}", self.question, self.answer)
        }
    }
}

/// Preprocessed tokens of one QA pair, index-aligned with its source pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedUnit {
    pub question_tokens: Vec<String>,
    pub answer_tokens: Vec<String>,
}

impl TokenizedUnit {
    pub fn new(question_tokens: Vec<String>, answer_tokens: Vec<String>) -> Self {
        Self {
            question_tokens,
            answer_tokens,
        }
    }

    /// Pair up question and answer token rows, refusing rows of different lengths.
    pub fn zip(questions: Vec<Vec<String>>, answers: Vec<Vec<String>>) -> Result<Vec<Self>> {
        if questions.len() != answers.len() {
            return Err(Error::Alignment {
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        Ok(questions
            .into_iter()
            .zip(answers)
            .map(|(q, a)| Self::new(q, a))
            .collect())
    }

    /// Question tokens followed by answer tokens.
    pub fn whole(&self) -> impl Iterator<Item = &str> {
        self.question_tokens
            .iter()
            .chain(self.answer_tokens.iter())
            .map(String::as_str)
    }
}

/// A run of consecutive QA pairs of one file judged to be on one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(rename = "File")]
    pub file: PathBuf,
    #[serde(rename = "Content")]
    pub content: String,
}

impl Chunk {
    pub fn new(file: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            content: content.into(),
        }
    }
}

/// The QA table: every extracted pair, grouped by file, files in read order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pairs: Vec<QaPair>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: Vec<QaPair>) -> Self {
        Self { pairs }
    }

    pub fn extend(&mut self, pairs: impl IntoIterator<Item = QaPair>) {
        self.pairs.extend(pairs);
    }

    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Contiguous runs of pairs sharing a file, in table order.
    pub fn files(&self) -> Vec<&[QaPair]> {
        let mut groups = Vec::new();
        let mut start = 0;

        for i in 1..=self.pairs.len() {
            if i == self.pairs.len() || self.pairs[i].file != self.pairs[start].file {
                groups.push(&self.pairs[start..i]);
                start = i;
            }
        }

        groups
    }

    /// Number of distinct file groups.
    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    /// Pairs extracted from one file.
    pub fn pairs_for(&self, file: &Path) -> impl Iterator<Item = &QaPair> {
        let file = file.to_path_buf();
        self.pairs.iter().filter(move |p| p.file == file)
    }
}

/// Final output table: one row per chunk.
#[derive(Debug, Clone, Default)]
pub struct ChunkedCorpus {
    chunks: Vec<Chunk>,
}

impl ChunkedCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, chunks: impl IntoIterator<Item = Chunk>) {
        self.chunks.extend(chunks);
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Similarity family used by a boundary detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityModel {
    /// Jaccard distance over token sets.
    Lexical,
    /// Cosine similarity over TF-IDF vectors.
    Cosine,
}

/// Which parts of two adjacent units are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonScope {
    /// Answer of unit i against question of unit i+1.
    Edge,
    /// Question and answer of unit i against those of unit i+1.
    Whole,
}

/// A similarity model combined with a comparison scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryStrategy {
    LexicalEdge,
    #[default]
    LexicalWhole,
    CosineEdge,
    CosineWhole,
}

impl BoundaryStrategy {
    pub const ALL: [BoundaryStrategy; 4] = [
        BoundaryStrategy::LexicalEdge,
        BoundaryStrategy::LexicalWhole,
        BoundaryStrategy::CosineEdge,
        BoundaryStrategy::CosineWhole,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryStrategy::LexicalEdge => "lexical-edge",
            BoundaryStrategy::LexicalWhole => "lexical-whole",
            BoundaryStrategy::CosineEdge => "cosine-edge",
            BoundaryStrategy::CosineWhole => "cosine-whole",
        }
    }

    pub fn model(&self) -> SimilarityModel {
        match self {
            BoundaryStrategy::LexicalEdge | BoundaryStrategy::LexicalWhole => {
                SimilarityModel::Lexical
            }
            BoundaryStrategy::CosineEdge | BoundaryStrategy::CosineWhole => SimilarityModel::Cosine,
        }
    }

    pub fn scope(&self) -> ComparisonScope {
        match self {
            BoundaryStrategy::LexicalEdge | BoundaryStrategy::CosineEdge => ComparisonScope::Edge,
            BoundaryStrategy::LexicalWhole | BoundaryStrategy::CosineWhole => {
                ComparisonScope::Whole
            }
        }
    }
}

impl FromStr for BoundaryStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown boundary strategy '{}' (expected one of: lexical-edge, lexical-whole, cosine-edge, cosine-whole)",
                    s
                ))
            })
    }
}

impl std::fmt::Display for BoundaryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Set of units a TF-IDF vocabulary is fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyScope {
    #[default]
    File,
    Corpus,
}

impl VocabularyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyScope::File => "file",
            VocabularyScope::Corpus => "corpus",
        }
    }
}

impl FromStr for VocabularyScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(VocabularyScope::File),
            "corpus" => Ok(VocabularyScope::Corpus),
            other => Err(Error::InvalidInput(format!(
                "unknown vocabulary scope '{}' (expected file or corpus)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for VocabularyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_kind_from_str() {
        assert_eq!(ReaderKind::from_str("label"), Some(ReaderKind::Label));
        assert_eq!(ReaderKind::from_str("ITALIC"), Some(ReaderKind::Italic));
        assert_eq!(ReaderKind::from_str("list"), Some(ReaderKind::List));
        assert_eq!(ReaderKind::from_str("underline"), None);
    }

    #[test]
    fn test_boundary_strategy_parsing() {
        assert_eq!(
            "cosine-edge".parse::<BoundaryStrategy>().unwrap(),
            BoundaryStrategy::CosineEdge
        );
        assert_eq!(
            "Lexical_Whole".parse::<BoundaryStrategy>().unwrap(),
            BoundaryStrategy::LexicalWhole
        );
        assert!("nearest-neighbour".parse::<BoundaryStrategy>().is_err());

        for strategy in BoundaryStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<BoundaryStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_strategy_model_and_scope() {
        assert_eq!(BoundaryStrategy::LexicalEdge.model(), SimilarityModel::Lexical);
        assert_eq!(BoundaryStrategy::LexicalEdge.scope(), ComparisonScope::Edge);
        assert_eq!(BoundaryStrategy::CosineWhole.model(), SimilarityModel::Cosine);
        assert_eq!(BoundaryStrategy::CosineWhole.scope(), ComparisonScope::Whole);
    }

    #[test]
    fn test_qa_pair_content() {
        let pair = QaPair::new("a.docx", "Q: where?", "Here.\nAnd there.");
        assert_eq!(pair.content(), "Q: where?\nHere.\nAnd there.");

        let bare = QaPair::new("a.docx", "Q: nothing?", "");
        assert_eq!(bare.content(), "Q: nothing?");
    }

    #[test]
    fn test_tokenized_unit_zip_alignment() {
        let units = TokenizedUnit::zip(
            vec![vec!["cat".to_string()], vec![]],
            vec![vec!["dog".to_string()], vec!["car".to_string()]],
        )
        .unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].whole().collect::<Vec<_>>(), vec!["cat", "dog"]);

        let err = TokenizedUnit::zip(vec![vec![]], vec![]).unwrap_err();
        assert_eq!(
            err,
            Error::Alignment {
                questions: 1,
                answers: 0
            }
        );
    }

    #[test]
    fn test_corpus_groups_by_file() {
        let corpus = Corpus::from_pairs(vec![
            QaPair::new("a.docx", "q1", "a1"),
            QaPair::new("a.docx", "q2", "a2"),
            QaPair::new("b.docx", "q3", "a3"),
        ]);

        let files = corpus.files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].len(), 2);
        assert_eq!(files[1][0].question, "q3");
        assert_eq!(corpus.pairs_for(Path::new("a.docx")).count(), 2);
        assert!(Corpus::new().files().is_empty());
    }

    #[test]
    fn test_paragraph_builders() {
        let para = Paragraph::new("Q: hello").italic().list_item();
        assert!(para.style.italic);
        assert!(!para.style.bold);
        assert!(para.style.list_item);
        assert!(Paragraph::new("   ").is_empty());
    }
}
