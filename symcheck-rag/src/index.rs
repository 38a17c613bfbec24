//! Vector index trait for storing and searching chunk embeddings.
//!
//! The index is append-only: it is populated once during the corpus build
//! and read-only afterwards. There is no delete or update path; rebuilding
//! requires a process restart.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// An in-memory nearest-neighbor index over chunk embeddings.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Append chunks to the index. Chunks must have embeddings set.
    async fn insert(&self, chunks: &[Chunk]) -> Result<()>;

    /// Search for the `top_k` chunks most similar to the given embedding.
    ///
    /// Returns results ordered by descending similarity score.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Return the number of chunks currently indexed.
    async fn len(&self) -> usize;
}
