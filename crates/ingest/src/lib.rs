pub mod chunk;
pub mod chunker;
pub mod reader;

pub use chunk::Chunk;
pub use chunker::{Chunker, ChunkerConfig, split_sentences};
pub use reader::{FileReader, TextExtractor};

use anyhow::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Generate a stable document ID from file path
pub fn generate_doc_id(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16])
}

/// Extract and chunk a single document
pub fn ingest_file(
    extractor: &dyn TextExtractor,
    chunker: &Chunker,
    file_path: &Path,
) -> Result<Vec<Chunk>> {
    let content = extractor.extract_text(file_path)?;
    let path_str = file_path.to_string_lossy().to_string();
    let doc_id = generate_doc_id(&path_str);

    let chunks = chunker.chunk_text(&doc_id, &content, &path_str);
    tracing::debug!(source = %path_str, chunks = chunks.len(), "chunked document");

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_file_assigns_doc_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.md");
        std::fs::write(&path, "Save early. Invest often.").unwrap();

        let chunks = ingest_file(&FileReader, &Chunker::default(), &path).unwrap();
        let expected = generate_doc_id(&path.to_string_lossy());

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].doc_id, expected);
        assert_eq!(chunks[0].ordinal, 0);
    }
}
