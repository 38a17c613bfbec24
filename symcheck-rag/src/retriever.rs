//! Retrieval orchestrator.
//!
//! The [`Retriever`] composes an [`EmbeddingProvider`], a [`VectorIndex`],
//! and a [`Chunker`]. The corpus is indexed once (chunk, embed in one batch,
//! insert) and queried many times (embed, search, filter).

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// Composes chunking, embedding, and vector search.
///
/// Construct one via [`Retriever::builder()`]. The index is append-only:
/// [`index_documents`](Retriever::index_documents) is intended to run once
/// at startup, after which the retriever is shared read-only.
pub struct Retriever {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    chunker: Arc<dyn Chunker>,
}

impl Retriever {
    /// Create a new [`RetrieverBuilder`].
    pub fn builder() -> RetrieverBuilder {
        RetrieverBuilder::default()
    }

    /// Return a reference to the retrieval configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return the number of chunks currently indexed.
    pub async fn indexed_chunks(&self) -> usize {
        self.index.len().await
    }

    /// Index a document set: chunk every document, embed all chunks in a
    /// single batched call (preserving chunk order), and insert the
    /// (vector, chunk) pairs into the index.
    ///
    /// Returns the number of chunks indexed. All embeddings must succeed for
    /// the call to succeed; on failure nothing is inserted.
    ///
    /// # Errors
    ///
    /// Propagates embedding and index errors unchanged.
    pub async fn index_documents(&self, documents: &[Document]) -> Result<usize> {
        let mut chunks = Vec::new();
        for document in documents {
            chunks.extend(self.chunker.chunk(document));
        }
        if chunks.is_empty() {
            info!(document_count = documents.len(), chunk_count = 0, "indexed corpus (empty)");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed during corpus indexing");
            e
        })?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::Embedding {
                provider: "batch".into(),
                message: format!(
                    "expected {} embeddings, got {}",
                    chunks.len(),
                    embeddings.len()
                ),
            });
        }

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        self.index.insert(&chunks).await.map_err(|e| {
            error!(error = %e, "index insert failed during corpus indexing");
            e
        })?;

        let chunk_count = chunks.len();
        info!(document_count = documents.len(), chunk_count, "indexed corpus");
        Ok(chunk_count)
    }

    /// Retrieve the chunks most similar to `query`: embed, search with the
    /// configured `top_k`, drop results below the similarity threshold.
    /// The default threshold keeps everything, so retrieval is plain top-k
    /// unless a threshold is set explicitly.
    ///
    /// Results are ordered by descending relevance score.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            e
        })?;

        let results = self.index.search(&query_embedding, self.config.top_k).await?;

        let threshold = self.config.similarity_threshold;
        let filtered: Vec<SearchResult> =
            results.into_iter().filter(|r| r.score >= threshold).collect();

        info!(result_count = filtered.len(), "retrieval completed");
        Ok(filtered)
    }
}

/// Builder for constructing a [`Retriever`].
#[derive(Default)]
pub struct RetrieverBuilder {
    config: Option<RagConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    index: Option<Arc<dyn VectorIndex>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RetrieverBuilder {
    /// Set the retrieval configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index backend.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`Retriever`], validating that all fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<Retriever> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedder =
            self.embedder.ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let index = self.index.ok_or_else(|| RagError::Config("index is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::Config("chunker is required".to_string()))?;

        Ok(Retriever { config, embedder, index, chunker })
    }
}
