//! Configuration commands.

use super::config_file;
use anyhow::{Context, Result};
use colored::Colorize;
use parley_config::Config;
use std::path::Path;

pub fn show(explicit: Option<&Path>) -> Result<()> {
    let path = config_file(explicit)?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));

    if path.exists() {
        let contents = std::fs::read_to_string(&path).context("Failed to read config file")?;
        println!("{}", contents);
    } else {
        println!(
            "{} No config file at {}, showing defaults.",
            "Note:".yellow(),
            path.display()
        );
        println!();
        println!("{}", Config::default_config_string());
    }

    Ok(())
}

pub fn path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", config_file(explicit)?.display());
    Ok(())
}

pub fn set(explicit: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let path = config_file(explicit)?;

    let mut config = Config::load_from(&path).context("Failed to load config")?;
    config
        .set(key, value)
        .with_context(|| format!("Cannot set {}", key))?;
    config.save_to(&path).context("Failed to save config")?;

    println!("{} Set {} = {}", "✓".green(), key.cyan(), value);

    Ok(())
}
