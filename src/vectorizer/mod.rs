//! TF-IDF vectorization over a learned vocabulary.
//!
//! The [`TfIdfVectorizer`] learns a term → index mapping and per-term
//! inverse-document-frequency weights from a tokenized training corpus, then
//! turns arbitrary token sequences into L2-normalized sparse feature
//! vectors. Terms unseen at fit time contribute nothing at transform time,
//! so inference never fails on new vocabulary.
//!
//! IDF uses the smoothed form `ln((1 + N) / (1 + df)) + 1`, which stays
//! positive even for terms present in every document.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritasError};

/// Configuration for vocabulary construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Minimum document frequency a term needs to enter the vocabulary.
    pub min_df: usize,
    /// Optional cap on vocabulary size; keeps the top-N terms by document
    /// frequency, ties broken by first-seen order.
    pub max_features: Option<usize>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        VectorizerConfig {
            min_df: 1,
            max_features: None,
        }
    }
}

/// A sparse feature vector over vocabulary indices.
///
/// Entries are stored sorted by index. Positions absent from `entries` are
/// implicitly zero; `dim` is the full vocabulary size.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Create an all-zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        SparseVector {
            dim,
            entries: Vec::new(),
        }
    }

    /// Create a vector from (index, value) entries.
    ///
    /// Zero-valued entries are dropped and the rest sorted by index.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, v)| v != 0.0);
        entries.sort_unstable_by_key(|&(i, _)| i);
        SparseVector { dim, entries }
    }

    /// The full dimensionality of the vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The non-zero (index, value) entries, sorted by index.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product against a dense weight vector of matching dimension.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(i, v)| v * dense[i])
            .sum()
    }

    /// Euclidean norm.
    pub fn l2_norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, v)| v * v)
            .sum::<f64>()
            .sqrt()
    }

    /// Scale the vector to unit Euclidean norm.
    ///
    /// A zero vector stays zero; this never divides by zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.l2_norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }
}

/// TF-IDF vectorizer: a fitted vocabulary plus idf weights.
///
/// Immutable once fitted; retraining builds a fresh instance.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term → index mapping, indices stable after fit.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per term, index-aligned with the
    /// vocabulary.
    idf: Vec<f64>,
    /// Vocabulary construction settings.
    config: VectorizerConfig,
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer with the given configuration.
    pub fn new(config: VectorizerConfig) -> Self {
        TfIdfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            config,
        }
    }

    /// Reconstruct a fitted vectorizer from persisted parts.
    pub fn from_parts(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        TfIdfVectorizer {
            vocabulary,
            idf,
            config: VectorizerConfig::default(),
        }
    }

    /// Fit the vocabulary and idf weights on a tokenized corpus.
    ///
    /// Vocabulary indices follow first-seen order among the terms that pass
    /// the `min_df` threshold and the optional `max_features` cap.
    ///
    /// # Errors
    ///
    /// Returns a `Data` error when the corpus is empty or no term survives
    /// the frequency threshold.
    pub fn fit(&mut self, corpus: &[Vec<String>]) -> Result<()> {
        if corpus.is_empty() {
            return Err(VeritasError::data("cannot fit vectorizer on an empty corpus"));
        }

        let n_documents = corpus.len();
        let mut first_seen: Vec<String> = Vec::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for tokens in corpus {
            let mut seen_in_doc: HashSet<&str> = HashSet::new();
            for token in tokens {
                if seen_in_doc.insert(token) {
                    let df = document_frequency.entry(token.clone()).or_insert(0);
                    if *df == 0 {
                        first_seen.push(token.clone());
                    }
                    *df += 1;
                }
            }
        }

        // Apply the min_df threshold in first-seen order.
        let mut kept: Vec<(String, usize, usize)> = first_seen
            .into_iter()
            .enumerate()
            .filter_map(|(order, term)| {
                let df = document_frequency[&term];
                (df >= self.config.min_df).then_some((term, df, order))
            })
            .collect();

        // Cap to the most frequent terms, then restore first-seen order for
        // index assignment.
        if let Some(cap) = self.config.max_features {
            if kept.len() > cap {
                kept.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
                kept.truncate(cap);
                kept.sort_by_key(|&(_, _, order)| order);
            }
        }

        if kept.is_empty() {
            return Err(VeritasError::data(
                "no term passed the document-frequency threshold",
            ));
        }

        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (index, (term, df, _)) in kept.into_iter().enumerate() {
            vocabulary.insert(term, index);
            idf.push(((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0);
        }

        debug!(
            "fitted vectorizer: {} terms over {} documents",
            vocabulary.len(),
            n_documents
        );

        self.vocabulary = vocabulary;
        self.idf = idf;

        Ok(())
    }

    /// Transform a token sequence into an L2-normalized TF-IDF vector.
    ///
    /// Term frequency is the raw count divided by the full token count,
    /// out-of-vocabulary tokens included in the denominator. Tokens absent
    /// from the vocabulary contribute nothing; a sequence made entirely of
    /// unseen tokens yields the zero vector.
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        if tokens.is_empty() {
            return SparseVector::zeros(self.vocabulary.len());
        }

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let doc_length = tokens.len() as f64;
        let entries = counts
            .into_iter()
            .map(|(index, count)| (index, count / doc_length * self.idf[index]))
            .collect();

        let mut vector = SparseVector::from_entries(self.vocabulary.len(), entries);
        vector.l2_normalize();
        vector
    }

    /// The size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// The fitted term → index mapping.
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// The fitted idf weights, index-aligned with the vocabulary.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}
