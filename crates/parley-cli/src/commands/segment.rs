//! Run the full pipeline: read, preprocess, chunk, save.

use super::{expand_path, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parley_config::Config;
use parley_core::Corpus;
use parley_ingest::{load_pairs, save_chunks, Chunker, Segmenter};
use parley_process::LinguisticPipeline;
use std::path::Path;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub strategy: Option<String>,
    pub vocabulary: Option<String>,
    pub parallel: bool,
    pub workers: Option<usize>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(strategy) = &self.strategy {
            config.segment.strategy = strategy.parse()?;
        }
        if let Some(vocabulary) = &self.vocabulary {
            config.segment.vocabulary_scope = vocabulary.parse()?;
        }
        if self.parallel {
            config.segment.parallel = true;
        }
        if let Some(workers) = self.workers {
            config.segment.workers = workers;
        }
        Ok(())
    }
}

pub fn run(config_path: Option<&Path>, input: &str, output: &Path, overrides: Overrides) -> Result<()> {
    let mut config = load_config(config_path)?;
    overrides.apply(&mut config)?;

    let input = expand_path(input);
    let pipeline = LinguisticPipeline::from_config(&config.preprocess)
        .context("Failed to load linguistic resources")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    pb.set_message(format!("Reading {}", input.display()));
    let corpus = read_input(&input, &config)?;

    pb.set_message(format!(
        "Chunking {} pairs ({})",
        corpus.len(),
        config.segment.strategy
    ));
    let chunked = Chunker::from_config(&config.segment).segment(&corpus, &pipeline)?;

    pb.finish_and_clear();

    save_chunks(&chunked, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} files, {} pairs, {} chunks",
        "Segmented:".green().bold(),
        corpus.file_count(),
        corpus.len(),
        chunked.len()
    );
    println!(
        "  Strategy: {} ({} vocabulary)",
        config.segment.strategy, config.segment.vocabulary_scope
    );
    println!("  Output: {}", output.display());

    Ok(())
}

/// A folder is read from scratch; a CSV file is taken as a saved QA table.
fn read_input(input: &Path, config: &Config) -> Result<Corpus> {
    let is_table = input.is_file()
        && input
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

    if is_table {
        load_pairs(input).with_context(|| format!("Failed to load QA table {}", input.display()))
    } else {
        Segmenter::from_config(config)
            .read(input)
            .with_context(|| format!("Failed to read {}", input.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::{BoundaryStrategy, VocabularyScope};

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        Overrides {
            strategy: Some("cosine_edge".to_string()),
            vocabulary: Some("corpus".to_string()),
            parallel: true,
            workers: Some(3),
        }
        .apply(&mut config)
        .unwrap();

        assert_eq!(config.segment.strategy, BoundaryStrategy::CosineEdge);
        assert_eq!(config.segment.vocabulary_scope, VocabularyScope::Corpus);
        assert!(config.segment.parallel);
        assert_eq!(config.segment.workers, 3);

        let mut untouched = Config::default();
        Overrides::default().apply(&mut untouched).unwrap();
        assert!(!untouched.segment.parallel);
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let mut config = Config::default();
        let overrides = Overrides {
            strategy: Some("semantic".to_string()),
            ..Overrides::default()
        };
        assert!(overrides.apply(&mut config).is_err());
    }

    #[test]
    fn test_segment_from_saved_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("qa.csv");
        let out = dir.path().join("chunks.csv");

        std::fs::write(
            &table,
            "File,Question,Answer\na.docx,Q: cat dog?,cat\na.docx,Q: dog?,cat dog\na.docx,Q: car plane?,plane\n",
        )
        .unwrap();

        let corpus = read_input(&table, &Config::default()).unwrap();
        assert_eq!(corpus.len(), 3);

        let config_file = dir.path().join("config.toml");
        run(
            Some(config_file.as_path()),
            &table.to_string_lossy(),
            &out,
            Overrides::default(),
        )
        .unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("File,Content"));
    }
}
