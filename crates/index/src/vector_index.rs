use serde::{Deserialize, Serialize};

use crate::IndexError;
use crate::sparse::SparseVector;
use crate::tfidf::{TfidfVectorizer, VectorizerConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub score: f32,
    /// Row of the chunk in the fitted corpus.
    pub position: usize,
}

struct FittedIndex {
    vectorizer: TfidfVectorizer,
    rows: Vec<SparseVector>,
    chunks: Vec<String>,
}

/// TF-IDF weighted chunk matrix searched by cosine similarity.
pub struct VectorIndex {
    config: VectorizerConfig,
    fitted: Option<FittedIndex>,
}

impl Default for VectorIndex {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

impl VectorIndex {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config, fitted: None }
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn len(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vocabulary_len(&self) -> usize {
        self.fitted
            .as_ref()
            .map_or(0, |f| f.vectorizer.vocabulary_len())
    }

    /// Build vocabulary and matrix over `chunks`, replacing any previous fit.
    pub fn fit(&mut self, chunks: &[String]) {
        let mut vectorizer = TfidfVectorizer::new(self.config.clone());
        let rows = vectorizer.fit_transform(chunks);

        tracing::info!(
            chunks = rows.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "vector index fitted"
        );

        self.fitted = Some(FittedIndex {
            vectorizer,
            rows,
            chunks: chunks.to_vec(),
        });
    }

    /// Top `k` chunks by cosine similarity, best first.
    ///
    /// Every row is ranked, so zero-score rows fill the tail when few chunks
    /// share terms with the query. Equal scores keep corpus order.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, IndexError> {
        let fitted = self.fitted.as_ref().ok_or(IndexError::NotFitted)?;
        let query_vector = fitted.vectorizer.transform(query)?;

        let mut scored: Vec<(usize, f32)> = fitted
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| (position, query_vector.cosine(row)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(position, score)| SearchResult {
                content: fitted.chunks[position].clone(),
                score,
                position,
            })
            .collect())
    }
}
