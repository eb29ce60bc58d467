//! Extract the QA table from a folder of transcripts.

use super::{expand_path, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parley_ingest::{save_pairs, Segmenter};
use std::path::Path;

pub fn run(config_path: Option<&Path>, folder: &str, output: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let folder = expand_path(folder);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Reading {}", folder.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let corpus = Segmenter::from_config(&config)
        .read(&folder)
        .with_context(|| format!("Failed to read {}", folder.display()))?;

    pb.finish_and_clear();

    save_pairs(&corpus, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} pairs from {} files",
        "Extracted:".green().bold(),
        corpus.len(),
        corpus.file_count()
    );
    println!("  Output: {}", output.display());

    Ok(())
}
