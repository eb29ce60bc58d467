//! Linguistic resources: stopwords, colloquial forms, lemmas and POS tags.

use crate::error::{ProcessError, ProcessResult};
use parley_config::PreprocessConfig;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immutable lookup tables shared by every preprocessing call.
#[derive(Debug, Clone, Default)]
pub struct Lexicons {
    stopwords: HashSet<String>,
    colloquial: HashMap<String, String>,
    lemmas: HashMap<String, String>,
    /// `None` disables part-of-speech filtering.
    tags: Option<HashMap<String, String>>,
}

impl Lexicons {
    /// Empty tables: nothing is removed, standardized, lemmatized or filtered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every resource named in the config.
    pub fn load(config: &PreprocessConfig) -> ProcessResult<Self> {
        let mut lexicons = Self::empty();

        if let Some(path) = &config.stopwords_file {
            let path = expand(path);
            let text = read_resource(&path)?;
            lexicons = lexicons.with_stopwords(parse_stopwords(&text));
        }
        lexicons = lexicons.with_stopwords(config.extra_stopwords.iter().cloned());

        if let Some(path) = &config.colloquial_file {
            let path = expand(path);
            let text = read_resource(&path)?;
            lexicons = lexicons.with_colloquial(parse_pairs(&path, &text, ", ")?);
        }

        if let Some(path) = &config.lemma_file {
            let path = expand(path);
            let text = read_resource(&path)?;
            lexicons = lexicons.with_lemmas(parse_pairs(&path, &text, "\t")?);
        }

        if let Some(path) = &config.pos_lexicon_file {
            let path = expand(path);
            let text = read_resource(&path)?;
            lexicons = lexicons.with_tags(parse_pairs(&path, &text, "\t")?);
        }

        debug!(
            "Loaded lexicons: {} stopwords, {} colloquial forms, {} lemmas, {} tagged lemmas",
            lexicons.stopwords.len(),
            lexicons.colloquial.len(),
            lexicons.lemmas.len(),
            lexicons.tags.as_ref().map(|t| t.len()).unwrap_or(0)
        );

        Ok(lexicons)
    }

    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.into().to_lowercase()));
        self
    }

    pub fn with_colloquial<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.colloquial.extend(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into().to_lowercase())),
        );
        self
    }

    pub fn with_lemmas<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.lemmas.extend(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into().to_lowercase())),
        );
        self
    }

    pub fn with_tags<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags.get_or_insert_with(HashMap::new).extend(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into().to_uppercase())),
        );
        self
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Standard form of a colloquial token, or the token itself.
    pub fn standardize(&self, token: String) -> String {
        match self.colloquial.get(&token) {
            Some(standard) => standard.clone(),
            None => token,
        }
    }

    /// Lemma of a token, or the token itself when the form is unknown.
    pub fn lemmatize(&self, token: String) -> String {
        match self.lemmas.get(&token) {
            Some(lemma) => lemma.clone(),
            None => token,
        }
    }

    pub fn has_tagger(&self) -> bool {
        self.tags.is_some()
    }

    /// Universal POS tag of a lemma, if the lexicon knows it.
    pub fn tag(&self, lemma: &str) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get(lemma))
            .map(String::as_str)
    }
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).as_ref())
}

fn read_resource(path: &Path) -> ProcessResult<String> {
    if !path.exists() {
        return Err(ProcessError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn parse_stopwords(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `key<sep>value` lines, skipping blank lines and `#` comments.
fn parse_pairs(path: &Path, text: &str, sep: &str) -> ProcessResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once(sep).ok_or_else(|| ProcessError::Resource {
            path: path.to_path_buf(),
            line: index + 1,
            message: format!("expected two fields separated by {:?}", sep),
        })?;

        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(ProcessError::Resource {
                path: path.to_path_buf(),
                line: index + 1,
                message: "empty field".to_string(),
            });
        }

        pairs.push((key.to_string(), value.to_string()));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_lexicons_pass_tokens_through() {
        let lexicons = Lexicons::empty();
        assert!(!lexicons.is_stopword("in"));
        assert_eq!(lexicons.standardize("dej".to_string()), "dej");
        assert_eq!(lexicons.lemmatize("hodil".to_string()), "hodil");
        assert!(!lexicons.has_tagger());
        assert_eq!(lexicons.tag("hoditi"), None);
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempdir().unwrap();
        let stopwords = dir.path().join("stopwords.txt");
        let colloquial = dir.path().join("colloquial.txt");
        let lemmas = dir.path().join("lemmas.tsv");
        let pos = dir.path().join("pos.tsv");

        std::fs::write(&stopwords, "in\n  je \n\nda\n").unwrap();
        std::fs::write(&colloquial, "dej, daj\nmau, malo\n").unwrap();
        std::fs::write(&lemmas, "# form\tlemma\nhodil\thoditi\nšolo\tšola\n").unwrap();
        std::fs::write(&pos, "hoditi\tverb\nšola\tNOUN\n").unwrap();

        let config = PreprocessConfig {
            stopwords_file: Some(stopwords),
            colloquial_file: Some(colloquial),
            lemma_file: Some(lemmas),
            pos_lexicon_file: Some(pos),
            ..PreprocessConfig::default()
        };
        let lexicons = Lexicons::load(&config).unwrap();

        assert!(lexicons.is_stopword("je"));
        assert!(lexicons.is_stopword("um"));
        assert_eq!(lexicons.standardize("mau".to_string()), "malo");
        assert_eq!(lexicons.lemmatize("šolo".to_string()), "šola");
        assert_eq!(lexicons.tag("hoditi"), Some("VERB"));
        assert_eq!(lexicons.tag("nekaj"), None);
    }

    #[test]
    fn test_missing_resource_file() {
        let config = PreprocessConfig {
            lemma_file: Some(PathBuf::from("/definitely/not/here.tsv")),
            ..PreprocessConfig::default()
        };
        assert!(matches!(
            Lexicons::load(&config),
            Err(ProcessError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_pair_line_reports_line_number() {
        let err = parse_pairs(Path::new("lemmas.tsv"), "ok\tfine\nbroken line\n", "\t").unwrap_err();
        match err {
            ProcessError::Resource { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
