//! Document chunking.
//!
//! Chunks are the unit of retrieval: each rendered case sentence is split
//! into bounded-length pieces by [`FixedSizeChunker`], a character-based
//! sliding window with overlap between consecutive chunks.

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no
/// embeddings; embeddings are attached later by the retriever.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    /// Each returned chunk has an empty embedding vector.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size chunks by character count with overlap.
///
/// The window advances by `chunk_size - chunk_overlap` characters, so
/// consecutive chunks from the same document share exactly `chunk_overlap`
/// characters whenever the source is long enough. The split is
/// character-based (not byte-based), so multi-byte text never splits inside
/// a code point. Chunk IDs are `{document_id}_{chunk_index}` and each chunk
/// carries a `chunk_index` metadata field.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - maximum number of characters per chunk
    /// * `chunk_overlap` - characters shared between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] unless `chunk_overlap < chunk_size`: a
    /// window that cannot advance would drop everything after the first
    /// chunk.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = document.text.chars().collect();
        let step = self.chunk_size.saturating_sub(self.chunk_overlap);
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chunk_index = 0;

        loop {
            let end = (start + self.chunk_size).min(chars.len());
            let text: String = chars[start..end].iter().collect();

            let mut metadata = document.metadata.clone();
            metadata.insert("chunk_index".to_string(), chunk_index.to_string());

            chunks.push(Chunk {
                id: format!("{}_{chunk_index}", document.id),
                text,
                embedding: Vec::new(),
                metadata,
                document_id: document.id.clone(),
            });

            // step >= 1 is guaranteed by construction.
            if end == chars.len() {
                break;
            }
            start += step;
            chunk_index += 1;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn doc(id: &str, text: &str) -> Document {
        Document { id: id.into(), text: text.into(), metadata: HashMap::new() }
    }

    #[test]
    fn short_text_yields_single_chunk() {
        let chunker = FixedSizeChunker::new(300, 30).unwrap();
        let chunks = chunker.chunk(&doc("case_1", "fever and cough"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "fever and cough");
        assert_eq!(chunks[0].id, "case_1_0");
        assert_eq!(chunks[0].document_id, "case_1");
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = FixedSizeChunker::new(300, 30).unwrap();
        assert!(chunker.chunk(&doc("case_1", "")).is_empty());
    }

    #[test]
    fn chunks_respect_size_bound_and_overlap() {
        let text: String = "abcdefghij".repeat(70); // 700 chars
        let chunker = FixedSizeChunker::new(300, 30).unwrap();
        let chunks = chunker.chunk(&doc("case_1", &text));

        // Windows start at 0, 270, 540; the last one is short.
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 300);
        }
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let next: Vec<char> = pair[1].text.chars().collect();
            let tail: String = prev[prev.len() - 30..].iter().collect();
            let head: String = next[..30].iter().collect();
            assert_eq!(tail, head, "consecutive chunks must share exactly 30 chars");
        }
    }

    #[test]
    fn chunking_is_deterministic() {
        let text: String = "symptom data ".repeat(60);
        let chunker = FixedSizeChunker::new(300, 30).unwrap();
        let document = doc("case_9", &text);
        let first = chunker.chunk(&document);
        let second = chunker.chunk(&document);
        assert_eq!(first, second);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text: String = "发热咳嗽".repeat(100); // 400 chars, multi-byte
        let chunker = FixedSizeChunker::new(300, 30).unwrap();
        let chunks = chunker.chunk(&doc("case_2", &text));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text.chars().count(), 300);
    }

    #[test]
    fn oversized_overlap_is_rejected() {
        assert!(matches!(FixedSizeChunker::new(100, 100), Err(RagError::Config(_))));
        assert!(matches!(FixedSizeChunker::new(30, 300), Err(RagError::Config(_))));
        assert!(matches!(FixedSizeChunker::new(0, 0), Err(RagError::Config(_))));
    }

    #[test]
    fn no_text_is_dropped_with_maximal_overlap() {
        let text: String = "y".repeat(1000);
        let chunker = FixedSizeChunker::new(100, 99).unwrap();
        let chunks = chunker.chunk(&doc("case_4", &text));

        // The window advances one char at a time and still covers the tail.
        assert_eq!(chunks.len(), 901);
        assert_eq!(chunks.last().unwrap().text.chars().count(), 100);
    }

    #[test]
    fn chunk_index_recorded_in_metadata() {
        let text: String = "x".repeat(600);
        let chunker = FixedSizeChunker::new(300, 30).unwrap();
        let chunks = chunker.chunk(&doc("case_3", &text));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.get("chunk_index"), Some(&i.to_string()));
        }
    }
}
