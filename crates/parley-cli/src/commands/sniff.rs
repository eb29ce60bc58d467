//! Show how a transcript would be read.

use super::{expand_path, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use parley_core::ReaderKind;
use parley_ingest::{parse_file, sniff, Reader, SniffScores, SNIFF_WINDOW};
use std::path::Path;

pub fn run(config_path: Option<&Path>, file: &str) -> Result<()> {
    load_config(config_path)?;

    let path = expand_path(file);
    let document =
        parse_file(&path).with_context(|| format!("Failed to parse {}", path.display()))?;

    let scores = SniffScores::of(&document);

    println!("{} {}", "Transcript:".cyan().bold(), path.display());
    println!(
        "  {} paragraphs, {} non-empty, first {} inspected",
        document.paragraphs.len(),
        document.non_empty().count(),
        SNIFF_WINDOW
    );
    println!();

    for kind in ReaderKind::PRIORITY {
        println!("  {:<8} {}", kind.as_str(), scores.get(kind));
    }
    println!();

    let kind = sniff(&document)?;
    let reader = Reader::for_kind(kind, &document)?;
    let extraction = reader.extract(&document);

    match &reader {
        Reader::Label { label } => println!(
            "{} {} (label {})",
            "Reader:".green().bold(),
            kind,
            label.cyan()
        ),
        _ => println!("{} {}", "Reader:".green().bold(), kind),
    }
    println!("  {} question/answer pairs", extraction.len());

    if let Some(question) = extraction.questions.first() {
        println!("  First question: {}", question.dimmed());
    }

    Ok(())
}
