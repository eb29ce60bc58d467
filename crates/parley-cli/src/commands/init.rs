//! Initialize Parley.

use super::config_file;
use anyhow::{Context, Result};
use colored::Colorize;
use parley_config::Config;
use std::path::Path;

pub fn run(explicit: Option<&Path>) -> Result<()> {
    let path = config_file(explicit)?;

    if path.exists() {
        println!("{} Parley is already initialized.", "Note:".yellow().bold());
        println!("  Config: {}", path.display());
        return Ok(());
    }

    println!("{}", "Initializing Parley...".cyan().bold());

    Config::create_default_file(&path).context("Failed to create config file")?;
    println!("  {} Created config: {}", "✓".green(), path.display());

    println!();
    println!("{}", "Parley initialized successfully!".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  1. Pick a boundary strategy: {}",
        "parley config set segment.strategy cosine-whole".cyan()
    );
    println!(
        "  2. Check a transcript: {}",
        "parley sniff ~/interviews/first.docx".cyan()
    );
    println!(
        "  3. Chunk a folder: {}",
        "parley segment ~/interviews -o chunks.csv".cyan()
    );

    Ok(())
}
