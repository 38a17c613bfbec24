//! # symcheck-rag
//!
//! Retrieval core for the symcheck symptom checker.
//!
//! Provides the pieces of the retrieval-augmented pipeline that sit below
//! the domain layer:
//!
//! - [`Document`], [`Chunk`], [`SearchResult`] data types
//! - [`FixedSizeChunker`], a character-based sliding-window chunker
//! - [`EmbeddingProvider`] with an OpenAI implementation ([`OpenAIEmbedder`])
//! - [`VectorIndex`] with a cosine-similarity [`InMemoryIndex`]
//! - [`Retriever`], the index-once / query-many orchestrator
//!
//! The embedding and index seams are traits so the core is testable against
//! deterministic fakes without network access.

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod inmemory;
pub mod openai;
pub mod retriever;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_TOP_K, RagConfig};
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use index::VectorIndex;
pub use inmemory::InMemoryIndex;
pub use openai::OpenAIEmbedder;
pub use retriever::{Retriever, RetrieverBuilder};
