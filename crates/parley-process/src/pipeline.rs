//! The preprocessing pipeline applied to question and answer text.

use crate::error::ProcessResult;
use crate::lexicons::Lexicons;
use once_cell::sync::Lazy;
use parley_config::PreprocessConfig;
use regex::Regex;
use std::collections::HashSet;

/// Parenthesised interviewer remarks, e.g. "(laughs)".
static PAREN_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((.*?)\)").expect("Failed to compile parenthesis pattern"));

/// Bracketed transcriber notes, e.g. "[inaudible]".
static BRACKET_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("Failed to compile bracket pattern"));

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Failed to compile word pattern"));

/// Batch transform from raw strings to filtered lemma tokens.
///
/// Implementations must return exactly one token row per input string, in input order.
pub trait Preprocessor: Send + Sync {
    fn preprocess(&self, texts: &[String]) -> ProcessResult<Vec<Vec<String>>>;
}

/// Remove parenthesised and bracketed comments.
pub fn strip_comments(text: &str) -> String {
    let without_parens = PAREN_COMMENT.replace_all(text, "");
    BRACKET_COMMENT.replace_all(&without_parens, "").into_owned()
}

/// Split into lowercased word-character runs.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Lexicon-driven implementation of the full preprocessing chain.
#[derive(Debug, Clone)]
pub struct LinguisticPipeline {
    lexicons: Lexicons,
    keep_tags: HashSet<String>,
    keep_untagged: bool,
}

impl LinguisticPipeline {
    pub fn new<I, S>(lexicons: Lexicons, keep_tags: I, keep_untagged: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lexicons,
            keep_tags: keep_tags
                .into_iter()
                .map(|t| t.into().to_uppercase())
                .collect(),
            keep_untagged,
        }
    }

    /// Load resources named in the config and build the pipeline.
    pub fn from_config(config: &PreprocessConfig) -> ProcessResult<Self> {
        let lexicons = Lexicons::load(config)?;
        Ok(Self::new(
            lexicons,
            config.keep_tags.iter().cloned(),
            config.keep_untagged,
        ))
    }

    /// Run every stage on one string.
    pub fn process_text(&self, text: &str) -> Vec<String> {
        let cleaned = strip_comments(text);

        tokenize(&cleaned)
            .into_iter()
            .filter(|token| !self.lexicons.is_stopword(token))
            .map(|token| self.lexicons.standardize(token))
            .map(|token| self.lexicons.lemmatize(token))
            .filter(|lemma| self.keeps(lemma))
            .collect()
    }

    fn keeps(&self, lemma: &str) -> bool {
        if !self.lexicons.has_tagger() {
            return true;
        }
        match self.lexicons.tag(lemma) {
            Some(tag) => self.keep_tags.contains(tag),
            None => self.keep_untagged,
        }
    }
}

impl Default for LinguisticPipeline {
    fn default() -> Self {
        let config = PreprocessConfig::default();
        Self::new(
            Lexicons::empty().with_stopwords(config.extra_stopwords.iter().cloned()),
            config.keep_tags.iter().cloned(),
            config.keep_untagged,
        )
    }
}

impl Preprocessor for LinguisticPipeline {
    fn preprocess(&self, texts: &[String]) -> ProcessResult<Vec<Vec<String>>> {
        Ok(texts.iter().map(|text| self.process_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(
            strip_comments("I went (laughs) home [inaudible] early"),
            "I went  home  early"
        );
        // Non-greedy: text between two comments survives
        assert_eq!(strip_comments("(a) keep (b)"), " keep ");
    }

    #[test]
    fn test_tokenize_lowercases_unicode_words() {
        assert_eq!(
            tokenize("Šola, DOM in vrt!"),
            strings(&["šola", "dom", "in", "vrt"])
        );
        assert!(tokenize("...?!").is_empty());
    }

    #[test]
    fn test_stages_run_in_order() {
        // "mau" standardizes to "malo" before lemmatization maps "malo" to "mal"
        let lexicons = Lexicons::empty()
            .with_stopwords(["in", "um"])
            .with_colloquial([("mau", "malo")])
            .with_lemmas([("malo", "mal"), ("hodil", "hoditi")]);
        let pipeline = LinguisticPipeline::new(lexicons, ["NOUN", "VERB"], false);

        assert_eq!(
            pipeline.process_text("Um, hodil (smeh) in MAU"),
            strings(&["hoditi", "mal"])
        );
    }

    #[test]
    fn test_pos_filter_keeps_nouns_and_verbs() {
        let lexicons = Lexicons::empty().with_tags([
            ("cat", "NOUN"),
            ("run", "VERB"),
            ("quickly", "ADV"),
        ]);

        let strict = LinguisticPipeline::new(lexicons.clone(), ["NOUN", "VERB"], false);
        assert_eq!(
            strict.process_text("cat run quickly mystery"),
            strings(&["cat", "run"])
        );

        let lenient = LinguisticPipeline::new(lexicons, ["noun", "verb"], true);
        assert_eq!(
            lenient.process_text("cat run quickly mystery"),
            strings(&["cat", "run", "mystery"])
        );
    }

    #[test]
    fn test_preprocess_preserves_order_and_length() {
        let pipeline = LinguisticPipeline::new(Lexicons::empty(), ["NOUN"], false);
        let rows = pipeline
            .preprocess(&strings(&["first text", "", "(only a comment)", "last"]))
            .unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], strings(&["first", "text"]));
        assert!(rows[1].is_empty());
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], strings(&["last"]));
    }

    #[test]
    fn test_default_pipeline_drops_um() {
        let pipeline = LinguisticPipeline::default();
        assert_eq!(pipeline.process_text("um well"), strings(&["well"]));
    }
}
