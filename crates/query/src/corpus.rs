use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use index::{SearchResult, VectorIndex, VectorizerConfig};
use ingest::{Chunk, Chunker, ChunkerConfig, FileReader, TextExtractor};

use crate::{IngestError, RetrievalError, Retriever};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub documents: usize,
    pub chunks: usize,
    pub vocabulary: usize,
    pub built: bool,
}

/// Accumulates chunks from many documents, then fits one index over all of them.
///
/// Documents are ingested first and `build` runs once afterwards; fitting per
/// document would leave each in its own vector space.
pub struct Corpus {
    chunker: Chunker,
    extractor: Box<dyn TextExtractor>,
    chunks: Vec<Chunk>,
    index: VectorIndex,
    stale: bool,
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new(ChunkerConfig::default(), VectorizerConfig::default())
    }
}

impl Corpus {
    pub fn new(chunker: ChunkerConfig, vectorizer: VectorizerConfig) -> Self {
        Self::with_extractor(chunker, vectorizer, Box::new(FileReader))
    }

    pub fn with_extractor(
        chunker: ChunkerConfig,
        vectorizer: VectorizerConfig,
        extractor: Box<dyn TextExtractor>,
    ) -> Self {
        Self {
            chunker: Chunker::new(chunker),
            extractor,
            chunks: Vec::new(),
            index: VectorIndex::new(vectorizer),
            stale: false,
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn is_built(&self) -> bool {
        self.index.is_fitted()
    }

    /// Ingest one document; failures are logged and reported as `false`.
    pub fn ingest(&mut self, path: &Path) -> bool {
        match self.try_ingest(path) {
            Ok(count) => {
                info!(path = %path.display(), chunks = count, "ingested document");
                true
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to ingest document");
                false
            }
        }
    }

    /// Ingest one document, returning how many chunks it added.
    ///
    /// On error the accumulated chunks are left untouched.
    pub fn try_ingest(&mut self, path: &Path) -> Result<usize, IngestError> {
        if !path.exists() {
            return Err(IngestError::NotFound(path.to_path_buf()));
        }

        let chunks = ingest::ingest_file(self.extractor.as_ref(), &self.chunker, path).map_err(
            |source| IngestError::Extraction {
                path: path.to_path_buf(),
                source,
            },
        )?;

        if chunks.is_empty() {
            return Err(IngestError::NoContent(path.to_path_buf()));
        }

        let count = chunks.len();
        self.chunks.extend(chunks);
        if self.index.is_fitted() {
            self.stale = true;
        }
        Ok(count)
    }

    /// Ingest every supported file under `dir` in path order; returns the number ingested.
    pub fn ingest_directory(&mut self, dir: &Path) -> usize {
        let paths: Vec<_> = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && FileReader::is_supported(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        paths.iter().filter(|path| self.ingest(path)).count()
    }

    /// Fit the vector index over every chunk ingested so far.
    pub fn build(&mut self) {
        let texts: Vec<String> = self.chunks.iter().map(|c| c.text.clone()).collect();
        self.index.fit(&texts);
        self.stale = false;
    }

    pub fn search_corpus(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, RetrievalError> {
        if !self.index.is_fitted() {
            warn!("search requested before the corpus was built");
            return Err(RetrievalError::UnbuiltIndex);
        }
        if self.stale {
            warn!("corpus has chunks ingested after the last build; searching the previous build");
        }

        Ok(self.index.search(query, k)?)
    }

    pub fn stats(&self) -> CorpusStats {
        let documents: HashSet<&str> = self.chunks.iter().map(|c| c.doc_id.as_str()).collect();

        CorpusStats {
            documents: documents.len(),
            chunks: self.chunks.len(),
            vocabulary: self.index.vocabulary_len(),
            built: self.index.is_fitted(),
        }
    }
}

impl Retriever for Corpus {
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, RetrievalError> {
        self.search_corpus(query, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_missing_document_leaves_corpus_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut corpus = Corpus::default();
        corpus.ingest(&write(dir.path(), "a.txt", "Bonds pay interest. Stocks pay dividends."));
        let before = corpus.chunks().to_vec();

        assert!(!corpus.ingest(&dir.path().join("missing.txt")));
        assert_eq!(corpus.chunks(), before.as_slice());
        assert!(matches!(
            corpus.try_ingest(&dir.path().join("missing.txt")),
            Err(IngestError::NotFound(_))
        ));
    }

    #[test]
    fn test_unsupported_format_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "scan.pdf", "%PDF-1.4");
        let mut corpus = Corpus::default();

        assert!(matches!(
            corpus.try_ingest(&path),
            Err(IngestError::Extraction { .. })
        ));
        assert!(corpus.chunks().is_empty());
    }

    #[test]
    fn test_blank_document_has_no_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "blank.txt", "  \n\n ");
        let mut corpus = Corpus::default();

        assert!(matches!(corpus.try_ingest(&path), Err(IngestError::NoContent(_))));
    }

    #[test]
    fn test_search_before_build_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut corpus = Corpus::default();
        corpus.ingest(&write(dir.path(), "a.txt", "Bonds pay interest."));

        assert!(matches!(
            corpus.search_corpus("bonds", 3),
            Err(RetrievalError::UnbuiltIndex)
        ));
    }

    #[test]
    fn test_build_spans_all_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut corpus = Corpus::default();
        assert!(corpus.ingest(&write(dir.path(), "a.txt", "Municipal bonds are tax exempt.")));
        assert!(corpus.ingest(&write(dir.path(), "b.md", "Growth stocks reinvest earnings.")));
        corpus.build();

        let bonds = corpus.search_corpus("municipal bonds", 1).unwrap();
        let stocks = corpus.search_corpus("growth stocks", 1).unwrap();
        assert_eq!(bonds[0].content, "Municipal bonds are tax exempt.");
        assert_eq!(stocks[0].content, "Growth stocks reinvest earnings.");

        let stats = corpus.stats();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.chunks, 2);
        assert!(stats.built);
    }

    #[test]
    fn test_ingest_after_build_needs_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let mut corpus = Corpus::default();
        corpus.ingest(&write(dir.path(), "a.txt", "Municipal bonds are tax exempt."));
        corpus.build();
        corpus.ingest(&write(dir.path(), "b.txt", "Gold hedges against inflation."));

        // Still serving the first build
        assert_eq!(corpus.search_corpus("gold", 5).unwrap().len(), 1);

        corpus.build();
        let results = corpus.search_corpus("gold inflation", 5).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "Gold hedges against inflation.");
    }

    #[test]
    fn test_ingest_directory_skips_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "Index funds have low fees.");
        write(dir.path(), "b.md", "Rebalance once a year.");
        write(dir.path(), "c.pdf", "%PDF-1.4");
        let mut corpus = Corpus::default();

        assert_eq!(corpus.ingest_directory(dir.path()), 2);
        assert_eq!(corpus.stats().documents, 2);
        assert!(!corpus.is_built());
    }
}
