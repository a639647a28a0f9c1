pub mod chatbot;
pub mod corpus;
pub mod synthesizer;

pub use chatbot::{ConversationTurn, FinancialAdvisor, Reply, Role};
pub use corpus::{Corpus, CorpusStats};
pub use index::SearchResult;
pub use synthesizer::{ResponseSynthesizer, Topic};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("document not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to extract text from {path:?}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("document produced no chunks: {0:?}")]
    NoContent(PathBuf),
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("search called before the corpus index was built")]
    UnbuiltIndex,

    #[error(transparent)]
    Index(#[from] index::IndexError),
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("no phrases to choose from in the {0} pool")]
    EmptyPhrasePool(&'static str),
}

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Anything that can rank passages for a query.
pub trait Retriever {
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, RetrievalError>;
}
