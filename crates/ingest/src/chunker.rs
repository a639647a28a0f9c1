use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::chunk::Chunk;

/// Sentence terminator followed by the whitespace run that separates it from the next sentence.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence boundary pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Soft limit in characters; a single longer sentence still becomes its own chunk.
    pub max_chunk_size: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self { max_chunk_size: 200 }
    }
}

/// Split text into sentences on `.`, `!` or `?` followed by whitespace.
///
/// The terminator stays with its sentence. Internal whitespace is collapsed to
/// single spaces and empty pieces are dropped. Abbreviations such as "e.g. "
/// are split like any other boundary.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Terminators are single-byte ASCII
        push_normalized(&mut sentences, &text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    push_normalized(&mut sentences, &text[start..]);

    sentences
}

fn push_normalized(sentences: &mut Vec<String>, raw: &str) {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.is_empty() {
        sentences.push(normalized);
    }
}

pub struct Chunker {
    config: ChunkerConfig,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Greedily pack consecutive sentences into chunks of at most `max_chunk_size` characters.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_len = 0;

        for sentence in split_sentences(text) {
            let sentence_len = sentence.chars().count();

            // If adding this sentence exceeds max, flush buffer
            if buffer_len + sentence_len > self.config.max_chunk_size && !buffer.is_empty() {
                chunks.push(buffer.trim_end().to_string());
                buffer.clear();
                buffer_len = 0;
            }

            buffer.push_str(&sentence);
            buffer.push(' ');
            buffer_len += sentence_len + 1;
        }

        // Flush remaining buffer
        if !buffer.trim().is_empty() {
            chunks.push(buffer.trim_end().to_string());
        }

        chunks
    }

    pub fn chunk_text(&self, doc_id: &str, text: &str, source: &str) -> Vec<Chunk> {
        self.split(text)
            .into_iter()
            .enumerate()
            .map(|(ordinal, chunk)| {
                Chunk::new(doc_id.to_string(), chunk, source.to_string(), ordinal)
            })
            .collect()
    }
}
