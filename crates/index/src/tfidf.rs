use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use crate::IndexError;
use crate::sparse::SparseVector;
use crate::stopwords::is_stop_word;

/// Words of two or more word characters.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths.
    pub ngram_range: (usize, usize),
    pub lowercase: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 10_000,
            ngram_range: (1, 2),
            lowercase: true,
        }
    }
}

/// Fitted vocabulary plus smoothed idf weights.
#[derive(Debug, Clone)]
struct Model {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

pub struct TfidfVectorizer {
    config: VectorizerConfig,
    model: Option<Model>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config, model: None }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.vocabulary.len())
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.model
            .as_ref()
            .is_some_and(|m| m.vocabulary.contains_key(term))
    }

    /// Tokenize, drop stop words, then emit n-grams over the surviving tokens.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = TOKEN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !is_stop_word(t))
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();

        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }

        terms
    }

    /// Learn vocabulary and idf from `documents`, then weight each of them.
    ///
    /// The previous model is replaced only once the new one is complete.
    pub fn fit_transform(&mut self, documents: &[String]) -> Vec<SparseVector> {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d)).collect();

        let mut total_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freqs: HashMap<&str, usize> = HashMap::new();

        for terms in &analyzed {
            let mut seen = HashSet::new();
            for term in terms {
                *total_counts.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freqs.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        // Keep the most frequent terms, ties by term order
        let mut ranked: Vec<(&str, usize)> = total_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.config.max_features);

        // Columns follow sorted term order
        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n_docs = documents.len() as f32;
        let vocabulary: HashMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect();
        let idf: Vec<f32> = kept
            .iter()
            .map(|term| {
                let df = doc_freqs.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let model = Model { vocabulary, idf };
        let rows = analyzed
            .iter()
            .map(|terms| Self::weigh(&model, terms))
            .collect();

        tracing::debug!(
            documents = documents.len(),
            vocabulary = model.vocabulary.len(),
            "fitted tf-idf model"
        );
        self.model = Some(model);
        rows
    }

    /// Project text into the fitted space; unknown terms are ignored.
    pub fn transform(&self, text: &str) -> Result<SparseVector, IndexError> {
        let model = self.model.as_ref().ok_or(IndexError::NotFitted)?;
        Ok(Self::weigh(model, &self.analyze(text)))
    }

    fn weigh(model: &Model, terms: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for term in terms {
            if let Some(&column) = model.vocabulary.get(term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }
        for (column, weight) in counts.iter_mut() {
            *weight *= model.idf[*column];
        }

        let mut vector = SparseVector::from_map(counts);
        vector.normalize();
        vector
    }
}
