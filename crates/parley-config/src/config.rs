//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use parley_core::{BoundaryStrategy, VocabularyScope};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub segment: SegmentConfig,

    #[serde(default)]
    pub preprocess: PreprocessConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&paths.config_file)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Check values that serde alone cannot reject.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ingest.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "ingest.extensions must name at least one extension".to_string(),
            ));
        }
        if self.preprocess.keep_tags.is_empty() {
            return Err(ConfigError::Invalid(
                "preprocess.keep_tags must name at least one tag".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a value by dotted key, e.g. `segment.strategy`.
    pub fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["segment", "strategy"] => self.segment.strategy = value.parse()?,
            ["segment", "vocabulary_scope"] => self.segment.vocabulary_scope = value.parse()?,
            ["segment", "parallel"] => self.segment.parallel = parse_bool(key, value)?,
            ["segment", "workers"] => {
                self.segment.workers = value
                    .parse()
                    .map_err(|_| ConfigError::Invalid(format!("{} expects a number", key)))?;
            }
            ["ingest", "follow_links"] => self.ingest.follow_links = parse_bool(key, value)?,
            ["preprocess", "stopwords_file"] => self.preprocess.stopwords_file = optional(value),
            ["preprocess", "colloquial_file"] => self.preprocess.colloquial_file = optional(value),
            ["preprocess", "lemma_file"] => self.preprocess.lemma_file = optional(value),
            ["preprocess", "pos_lexicon_file"] => {
                self.preprocess.pos_lexicon_file = optional(value)
            }
            ["preprocess", "keep_untagged"] => {
                self.preprocess.keep_untagged = parse_bool(key, value)?
            }
            ["ui", "color"] => self.ui.color = parse_bool(key, value)?,
            _ => return Err(ConfigError::Invalid(format!("Unknown config key: {}", key))),
        }

        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Parley Configuration
# Interview transcripts in, topical chunks out.

[ingest]
# Only files with these extensions are read
extensions = ["docx"]

# File name patterns to skip (hidden files, Word lock files)
ignore_patterns = [".*", "~$*"]

follow_links = true

[segment]
# Boundary detector: lexical-edge, lexical-whole, cosine-edge, cosine-whole
strategy = "lexical-whole"

# Where the TF-IDF vocabulary is fitted: file or corpus
vocabulary_scope = "file"

# Process files on a worker pool instead of one at a time
parallel = false
workers = 0                    # 0 = one worker per core

[preprocess]
# Optional linguistic resources; stages without a resource are skipped
# stopwords_file = "~/parley/stopwords.txt"        # one word per line
# colloquial_file = "~/parley/colloquial.txt"      # "colloquial, standard" per line
# lemma_file = "~/parley/lemmas.tsv"               # "form<TAB>lemma" per line
# pos_lexicon_file = "~/parley/pos.tsv"            # "lemma<TAB>UPOS" per line

extra_stopwords = ["um"]
keep_tags = ["NOUN", "VERB"]
keep_untagged = false

[ui]
color = true
"#
        .to_string()
    }
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} expects true or false", key)))
}

fn optional(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Document discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub follow_links: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["docx".to_string()],
            ignore_patterns: vec![".*".to_string(), "~$*".to_string()],
            follow_links: true,
        }
    }
}

/// Boundary detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub strategy: BoundaryStrategy,
    pub vocabulary_scope: VocabularyScope,
    pub parallel: bool,
    pub workers: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            strategy: BoundaryStrategy::default(),
            vocabulary_scope: VocabularyScope::default(),
            parallel: false,
            workers: 0,
        }
    }
}

/// Linguistic preprocessing resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub stopwords_file: Option<PathBuf>,
    pub colloquial_file: Option<PathBuf>,
    pub lemma_file: Option<PathBuf>,
    pub pos_lexicon_file: Option<PathBuf>,
    pub extra_stopwords: Vec<String>,
    pub keep_tags: Vec<String>,
    pub keep_untagged: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            stopwords_file: None,
            colloquial_file: None,
            lemma_file: None,
            pos_lexicon_file: None,
            extra_stopwords: vec!["um".to_string()],
            keep_tags: vec!["NOUN".to_string(), "VERB".to_string()],
            keep_untagged: false,
        }
    }
}

/// UI/Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
