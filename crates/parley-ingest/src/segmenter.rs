//! Reading a folder of transcripts into the QA table.

use crate::discover::discover_documents;
use crate::error::IngestResult;
use crate::parallel::Schedule;
use crate::parsers::parse_file;
use crate::readers::Reader;
use crate::sniffer::sniff;
use parley_config::{Config, IngestConfig};
use parley_core::{Corpus, QaPair};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extract the QA pairs of one transcript: parse, sniff, read.
pub fn extract_file(path: &Path) -> IngestResult<Vec<QaPair>> {
    let document = parse_file(path)?;
    let kind = sniff(&document)?;
    let reader = Reader::for_kind(kind, &document)?;
    let pairs = reader.extract_pairs(&document);

    debug!(
        "Read {} pairs from {} with the {} reader",
        pairs.len(),
        path.display(),
        kind
    );
    Ok(pairs)
}

/// Turns a folder of transcripts into one QA table.
pub struct Segmenter {
    ingest: IngestConfig,
    schedule: Schedule,
}

impl Segmenter {
    pub fn new(ingest: IngestConfig) -> Self {
        Self {
            ingest,
            schedule: Schedule::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let schedule = if config.segment.parallel {
            Schedule::parallel(config.segment.workers)
        } else {
            Schedule::sequential()
        };

        Self {
            ingest: config.ingest.clone(),
            schedule,
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Files under `folder` that would be read, in read order.
    pub fn discover(&self, folder: &Path) -> IngestResult<Vec<PathBuf>> {
        discover_documents(folder, &self.ingest)
    }

    /// Read every transcript under `folder`.
    ///
    /// Files are read in sorted path order and their pairs kept in that order.
    /// A file that cannot be parsed, sniffed or read is logged and skipped.
    pub fn read(&self, folder: &Path) -> IngestResult<Corpus> {
        let paths = self.discover(folder)?;
        let total = paths.len();
        info!("Reading {} transcripts from {}", total, folder.display());

        let results = self.schedule.map(paths, |path| {
            let result = extract_file(&path);
            (path, result)
        });

        let mut corpus = Corpus::new();
        let mut skipped = 0usize;

        for (path, result) in results {
            match result {
                Ok(pairs) => {
                    if pairs.is_empty() {
                        debug!("No questions found in {}", path.display());
                    }
                    corpus.extend(pairs);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped += 1;
                }
            }
        }

        info!(
            "Extracted {} pairs from {} of {} files ({} skipped)",
            corpus.len(),
            total - skipped,
            total,
            skipped
        );

        Ok(corpus)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}
