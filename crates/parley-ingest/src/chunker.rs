//! Topic chunking of extracted QA pairs.
//!
//! Each file's pairs are scanned once, left to right. Whenever two adjacent
//! units look different enough, the chunk id is bumped; consecutive pairs that
//! share an id are then concatenated into one chunk.
//!
//! What "different enough" means is a [`BoundaryDetector`]. Four are built from
//! a [`BoundaryStrategy`]: Jaccard distance or TF-IDF cosine similarity, each
//! comparing either an answer with the next question or two whole units.

use crate::error::IngestResult;
use crate::parallel::Schedule;
use crate::similarity::{
    cosine_similarity, jaccard_distance, TfidfSpace, COSINE_SIMILARITY_THRESHOLD,
    LEXICAL_DISTANCE_THRESHOLD,
};
use parley_config::SegmentConfig;
use parley_core::{
    BoundaryStrategy, Chunk, ChunkId, ChunkedCorpus, ComparisonScope, Corpus, Error, QaPair,
    SimilarityModel, TokenizedUnit, VocabularyScope,
};
use parley_process::{Preprocessor, ProcessError};
use tracing::{debug, info, warn};

/// Decides whether a topic boundary lies between two adjacent units.
pub trait BoundaryDetector: Send + Sync {
    fn is_boundary(&self, current: &TokenizedUnit, next: &TokenizedUnit) -> bool;
}

/// Jaccard distance between token sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalDetector {
    scope: ComparisonScope,
}

impl LexicalDetector {
    pub fn new(scope: ComparisonScope) -> Self {
        Self { scope }
    }

    pub fn distance(&self, current: &TokenizedUnit, next: &TokenizedUnit) -> f64 {
        match self.scope {
            ComparisonScope::Edge => jaccard_distance(
                current.answer_tokens.iter().map(String::as_str),
                next.question_tokens.iter().map(String::as_str),
            ),
            ComparisonScope::Whole => jaccard_distance(current.whole(), next.whole()),
        }
    }
}

impl BoundaryDetector for LexicalDetector {
    fn is_boundary(&self, current: &TokenizedUnit, next: &TokenizedUnit) -> bool {
        self.distance(current, next) > LEXICAL_DISTANCE_THRESHOLD
    }
}

/// Cosine similarity in a TF-IDF space fitted on the units it will compare.
#[derive(Debug, Clone)]
pub enum CosineDetector {
    /// Answers and questions get their own spaces; answer `i` is compared with question `i + 1`.
    Edge {
        questions: TfidfSpace,
        answers: TfidfSpace,
    },
    /// One space over question and answer tokens together.
    Whole { units: TfidfSpace },
}

impl CosineDetector {
    pub fn fit<'a, I>(scope: ComparisonScope, units: I) -> Self
    where
        I: IntoIterator<Item = &'a TokenizedUnit>,
    {
        let units: Vec<&TokenizedUnit> = units.into_iter().collect();

        match scope {
            ComparisonScope::Edge => CosineDetector::Edge {
                questions: TfidfSpace::fit(
                    units
                        .iter()
                        .map(|u| u.question_tokens.iter().map(String::as_str)),
                ),
                answers: TfidfSpace::fit(
                    units
                        .iter()
                        .map(|u| u.answer_tokens.iter().map(String::as_str)),
                ),
            },
            ComparisonScope::Whole => CosineDetector::Whole {
                units: TfidfSpace::fit(units.iter().map(|u| u.whole())),
            },
        }
    }

    pub fn similarity(&self, current: &TokenizedUnit, next: &TokenizedUnit) -> f64 {
        match self {
            CosineDetector::Edge { questions, answers } => cosine_similarity(
                &answers.vectorize(current.answer_tokens.iter().map(String::as_str)),
                &questions.vectorize(next.question_tokens.iter().map(String::as_str)),
            ),
            CosineDetector::Whole { units } => {
                cosine_similarity(&units.vectorize(current.whole()), &units.vectorize(next.whole()))
            }
        }
    }
}

impl BoundaryDetector for CosineDetector {
    fn is_boundary(&self, current: &TokenizedUnit, next: &TokenizedUnit) -> bool {
        self.similarity(current, next) < COSINE_SIMILARITY_THRESHOLD
    }
}

/// Build the detector for `strategy`, fitting vector spaces on `units` where needed.
pub fn build_detector<'a, I>(strategy: BoundaryStrategy, units: I) -> Box<dyn BoundaryDetector>
where
    I: IntoIterator<Item = &'a TokenizedUnit>,
{
    match strategy.model() {
        SimilarityModel::Lexical => Box::new(LexicalDetector::new(strategy.scope())),
        SimilarityModel::Cosine => Box::new(CosineDetector::fit(strategy.scope(), units)),
    }
}

/// Assign a chunk id to every unit of one file.
///
/// Ids start at 0 and grow by one at each detected boundary. The last unit is
/// never compared with anything.
pub fn assign_chunk_ids(units: &[TokenizedUnit], detector: &dyn BoundaryDetector) -> Vec<ChunkId> {
    let mut ids = Vec::with_capacity(units.len());
    let mut id: ChunkId = 0;

    for (i, unit) in units.iter().enumerate() {
        ids.push(id);
        if let Some(next) = units.get(i + 1) {
            if detector.is_boundary(unit, next) {
                id += 1;
            }
        }
    }

    ids
}

/// Concatenate consecutive pairs sharing a chunk id.
///
/// Each chunk keeps the file of its first pair; content is every member's
/// question and answer, newline separated, in the original order.
pub fn aggregate(pairs: &[QaPair], ids: &[ChunkId]) -> parley_core::Result<Vec<Chunk>> {
    if pairs.len() != ids.len() {
        return Err(Error::ChunkIdCount {
            expected: pairs.len(),
            actual: ids.len(),
        });
    }

    let mut chunks = Vec::new();
    let mut current: Option<(ChunkId, Chunk)> = None;

    for (pair, &id) in pairs.iter().zip(ids) {
        match current.as_mut() {
            Some((current_id, chunk)) if *current_id == id && chunk.file == pair.file => {
                chunk.content.push('\n');
                chunk.content.push_str(&pair.content());
            }
            _ => {
                if let Some((_, chunk)) = current.take() {
                    chunks.push(chunk);
                }
                current = Some((id, Chunk::new(&pair.file, pair.content())));
            }
        }
    }

    if let Some((_, chunk)) = current {
        chunks.push(chunk);
    }

    Ok(chunks)
}

/// Preprocess one file's questions and answers into aligned units.
pub fn tokenize_pairs(
    pairs: &[QaPair],
    preprocessor: &dyn Preprocessor,
) -> IngestResult<Vec<TokenizedUnit>> {
    let questions: Vec<String> = pairs.iter().map(|p| p.question.clone()).collect();
    let answers: Vec<String> = pairs.iter().map(|p| p.answer.clone()).collect();

    let question_tokens = aligned(preprocessor.preprocess(&questions)?, pairs.len())?;
    let answer_tokens = aligned(preprocessor.preprocess(&answers)?, pairs.len())?;

    Ok(TokenizedUnit::zip(question_tokens, answer_tokens)?)
}

fn aligned(rows: Vec<Vec<String>>, expected: usize) -> Result<Vec<Vec<String>>, ProcessError> {
    if rows.len() != expected {
        return Err(ProcessError::Misaligned {
            expected,
            actual: rows.len(),
        });
    }
    Ok(rows)
}

/// Chunks a corpus file by file.
#[derive(Debug, Clone)]
pub struct Chunker {
    strategy: BoundaryStrategy,
    vocabulary_scope: VocabularyScope,
    schedule: Schedule,
}

impl Chunker {
    pub fn new(strategy: BoundaryStrategy) -> Self {
        Self {
            strategy,
            vocabulary_scope: VocabularyScope::default(),
            schedule: Schedule::default(),
        }
    }

    pub fn from_config(config: &SegmentConfig) -> Self {
        let schedule = if config.parallel {
            Schedule::parallel(config.workers)
        } else {
            Schedule::sequential()
        };

        Self {
            strategy: config.strategy,
            vocabulary_scope: config.vocabulary_scope,
            schedule,
        }
    }

    pub fn with_strategy(mut self, strategy: BoundaryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_vocabulary_scope(mut self, scope: VocabularyScope) -> Self {
        self.vocabulary_scope = scope;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn strategy(&self) -> BoundaryStrategy {
        self.strategy
    }

    /// Chunk every file of the corpus.
    ///
    /// A file whose preprocessing fails or comes back misaligned is logged and
    /// left out; the rest of the corpus is still chunked.
    pub fn segment(
        &self,
        corpus: &Corpus,
        preprocessor: &dyn Preprocessor,
    ) -> IngestResult<ChunkedCorpus> {
        let files = corpus.files();

        let tokenized: Vec<(&[QaPair], Vec<TokenizedUnit>)> = self
            .schedule
            .map(files, |pairs| match tokenize_pairs(pairs, preprocessor) {
                Ok(units) => Some((pairs, units)),
                Err(e) => {
                    warn!("Skipping {}: preprocessing failed: {}", file_of(pairs), e);
                    None
                }
            })
            .into_iter()
            .flatten()
            .collect();

        let shared = match self.vocabulary_scope {
            VocabularyScope::Corpus => Some(build_detector(
                self.strategy,
                tokenized.iter().flat_map(|(_, units)| units.iter()),
            )),
            VocabularyScope::File => None,
        };

        let strategy = self.strategy;
        let shared = shared.as_deref();

        let results = self.schedule.map(tokenized, |(pairs, units)| {
            let ids = match shared {
                Some(detector) => assign_chunk_ids(&units, detector),
                None => assign_chunk_ids(&units, build_detector(strategy, &units).as_ref()),
            };
            let chunks = aggregate(pairs, &ids);
            (pairs, chunks)
        });

        let mut chunked = ChunkedCorpus::new();
        let mut files_chunked = 0usize;

        for (pairs, chunks) in results {
            match chunks {
                Ok(chunks) => {
                    debug!(
                        "{}: {} pairs -> {} chunks",
                        file_of(pairs),
                        pairs.len(),
                        chunks.len()
                    );
                    files_chunked += 1;
                    chunked.extend(chunks);
                }
                Err(e) => warn!("Skipping {}: {}", file_of(pairs), e),
            }
        }

        info!(
            "Chunked {} pairs from {} files into {} chunks ({}, {} vocabulary)",
            corpus.len(),
            files_chunked,
            chunked.len(),
            self.strategy,
            self.vocabulary_scope
        );

        Ok(chunked)
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(BoundaryStrategy::default())
    }
}

fn file_of(pairs: &[QaPair]) -> String {
    pairs
        .first()
        .map(|p| p.file.display().to_string())
        .unwrap_or_default()
}
