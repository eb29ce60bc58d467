//! Parley CLI - Turn interview transcripts into topical chunks

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Parley - Turn interview transcripts into topical chunks
#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "Extract question/answer pairs from interview transcripts and group them by topic", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default one
    #[arg(short, long, global = true, env = "PARLEY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Parley (create the config file)
    Init,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show which reader a transcript would be read with
    Sniff {
        /// Transcript file
        file: String,
    },

    /// Extract question/answer pairs from a folder of transcripts
    Read {
        /// Folder of transcripts
        folder: String,

        /// Output CSV file
        #[arg(short, long, default_value = "qa.csv")]
        output: PathBuf,
    },

    /// Extract pairs and group them into topical chunks
    Segment {
        /// Folder of transcripts, or a QA table written by `parley read`
        input: String,

        /// Output CSV file
        #[arg(short, long, default_value = "chunks.csv")]
        output: PathBuf,

        /// Boundary strategy: lexical-edge, lexical-whole, cosine-edge, cosine-whole
        #[arg(short, long)]
        strategy: Option<String>,

        /// Where TF-IDF statistics come from: file or corpus
        #[arg(long)]
        vocabulary: Option<String>,

        /// Process files on a worker pool
        #[arg(long)]
        parallel: bool,

        /// Worker threads for --parallel (0 = one per core)
        #[arg(long)]
        workers: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., segment.strategy)
        key: String,

        /// Value to set
        value: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parley=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parley=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::run(config_path),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(config_path),
            ConfigCommands::Path => commands::config::path(config_path),
            ConfigCommands::Set { key, value } => commands::config::set(config_path, &key, &value),
        },
        Commands::Sniff { file } => commands::sniff::run(config_path, &file),
        Commands::Read { folder, output } => commands::read::run(config_path, &folder, &output),
        Commands::Segment {
            input,
            output,
            strategy,
            vocabulary,
            parallel,
            workers,
        } => commands::segment::run(
            config_path,
            &input,
            &output,
            commands::segment::Overrides {
                strategy,
                vocabulary,
                parallel,
                workers,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
