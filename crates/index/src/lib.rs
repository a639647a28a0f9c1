pub mod sparse;
pub mod stopwords;
pub mod tfidf;
pub mod vector_index;

pub use sparse::SparseVector;
pub use tfidf::{TfidfVectorizer, VectorizerConfig};
pub use vector_index::{SearchResult, VectorIndex};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index has not been fitted")]
    NotFitted,
}
