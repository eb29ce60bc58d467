//! Similarity measures between token sequences.
//!
//! Two families are provided:
//!
//! - lexical overlap: Jaccard distance between token sets
//! - vector space: cosine similarity between TF-IDF vectors
//!
//! Both work on already preprocessed tokens and know nothing about chunks.

use std::collections::{HashMap, HashSet};

/// Lexical distance above which adjacent units are split.
pub const LEXICAL_DISTANCE_THRESHOLD: f64 = 0.75;

/// Cosine similarity below which adjacent units are split.
pub const COSINE_SIMILARITY_THRESHOLD: f64 = 0.50;

/// Jaccard distance `1 - |A ∩ B| / |A ∪ B|` between the token sets of `a` and `b`.
///
/// Two empty sets are treated as identical and have distance 0.
pub fn jaccard_distance<'a, A, B>(a: A, b: B) -> f64
where
    A: IntoIterator<Item = &'a str>,
    B: IntoIterator<Item = &'a str>,
{
    let a: HashSet<&str> = a.into_iter().collect();
    let b: HashSet<&str> = b.into_iter().collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    1.0 - intersection as f64 / union as f64
}

/// Sparse term-weight vector.
pub type SparseVector = HashMap<String, f64>;

/// Cosine similarity of two sparse vectors. A zero vector on either side gives 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // Iterate the smaller map.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();

    dot / (norm_a * norm_b)
}

fn norm(v: &SparseVector) -> f64 {
    v.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// A TF-IDF weighting fitted on a set of token sequences.
///
/// Weights are raw term frequency times `log2(N / df)` with no normalisation,
/// where `N` is the number of fitted sequences and `df` the number of them
/// containing the term. Terms never seen while fitting get no weight, as do
/// terms present in every fitted sequence.
#[derive(Debug, Clone, Default)]
pub struct TfidfSpace {
    idf: HashMap<String, f64>,
    documents: usize,
}

impl TfidfSpace {
    pub fn fit<'a, D, T>(documents: D) -> Self
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = &'a str>,
    {
        let mut df: HashMap<String, usize> = HashMap::new();
        let mut count = 0usize;

        for document in documents {
            count += 1;
            let unique: HashSet<&str> = document.into_iter().collect();
            for term in unique {
                *df.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let n = count as f64;
        let idf = df
            .into_iter()
            .map(|(term, df)| (term, (n / df as f64).log2()))
            .collect();

        Self {
            idf,
            documents: count,
        }
    }

    /// Number of sequences the space was fitted on.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Number of distinct terms seen while fitting.
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    pub fn vectorize<'a, T>(&self, tokens: T) -> SparseVector
    where
        T: IntoIterator<Item = &'a str>,
    {
        let mut tf: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *tf.entry(token).or_insert(0) += 1;
        }

        tf.into_iter()
            .filter_map(|(term, count)| {
                let idf = self.idf(term)?;
                let weight = count as f64 * idf;
                (weight != 0.0).then(|| (term.to_string(), weight))
            })
            .collect()
    }
}
