use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_id: String,
    pub chunk_id: String,
    pub text: String,
    pub source: String,
    pub ordinal: usize, // position within the source document
}

impl Chunk {
    pub fn new(doc_id: String, text: String, source: String, ordinal: usize) -> Self {
        // Generate stable chunk_id from content
        let chunk_id = Self::generate_chunk_id(&doc_id, &text, ordinal);

        Self {
            doc_id,
            chunk_id,
            text,
            source,
            ordinal,
        }
    }

    fn generate_chunk_id(doc_id: &str, text: &str, ordinal: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(doc_id.as_bytes());
        hasher.update(text.as_bytes());
        hasher.update(ordinal.to_string().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16]) // Use first 16 bytes (32 hex chars)
    }

    /// Length in characters, the unit the chunker budgets in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
