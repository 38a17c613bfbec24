//! Corpus builder and answer engine.
//!
//! [`EngineBuilder::build`] runs the prepare-once stage: dataset rows are
//! rendered to sentences, chunked, embedded in one batched call, and
//! inserted into a fresh in-memory index. The returned [`AnswerEngine`] is
//! the answer-many-times handle: each call embeds the filled prompt,
//! retrieves the top matching chunks, and forwards the assembled context to
//! the chat model.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use symcheck_model::{ChatModel, ChatRequest};
use symcheck_rag::{
    EmbeddingProvider, FixedSizeChunker, InMemoryIndex, RagConfig, Retriever,
};

use crate::dataset::{load_cases, to_documents};
use crate::error::{EngineError, Result};
use crate::prompt::{build_context, build_prompt};

/// Builds an [`AnswerEngine`] from a dataset file.
///
/// The embedding provider and chat model are injected so the whole engine
/// can be exercised against fakes without network access.
pub struct EngineBuilder {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    chat: Arc<dyn ChatModel>,
}

impl EngineBuilder {
    /// Create a builder with the default retrieval configuration
    /// (300-char chunks, 30-char overlap, top-k 4).
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, chat: Arc<dyn ChatModel>) -> Self {
        Self { config: RagConfig::default(), embedder, chat }
    }

    /// Override the retrieval configuration.
    pub fn with_config(mut self, config: RagConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the corpus and return the answer engine.
    ///
    /// Steps, in fixed order: load and validate the dataset, render one
    /// sentence per row, chunk, embed every chunk in a single batched call,
    /// insert into a fresh index. Any failure aborts the build; no partial
    /// corpus is retained (the index is only reachable through the returned
    /// engine).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Dataset`] for read/schema failures and
    /// [`EngineError::Retrieval`] for invalid chunking parameters and for
    /// embedding or index failures.
    pub async fn build(self, dataset_path: impl AsRef<Path>) -> Result<AnswerEngine> {
        let records = load_cases(&dataset_path)?;
        let documents = to_documents(&records);

        let chunker = FixedSizeChunker::new(self.config.chunk_size, self.config.chunk_overlap)?;
        let retriever = Retriever::builder()
            .config(self.config)
            .embedder(self.embedder.clone())
            .index(Arc::new(InMemoryIndex::new(self.embedder.dimensions())))
            .chunker(Arc::new(chunker))
            .build()?;

        let chunk_count = retriever.index_documents(&documents).await.map_err(|e| {
            error!(error = %e, "corpus build failed");
            e
        })?;

        info!(case_count = records.len(), chunk_count, "corpus built");
        Ok(AnswerEngine { retriever, chat: self.chat, case_count: records.len() })
    }
}

/// The built, process-lifetime answer engine.
///
/// Stateless per call: the index is read-only after the build and no
/// conversation memory is kept, so the engine can be shared behind an `Arc`
/// and called concurrently. A failed call leaves the index untouched.
pub struct AnswerEngine {
    retriever: Retriever,
    chat: Arc<dyn ChatModel>,
    case_count: usize,
}

impl std::fmt::Debug for AnswerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerEngine")
            .field("case_count", &self.case_count)
            .finish_non_exhaustive()
    }
}

impl AnswerEngine {
    /// Number of case records in the corpus.
    pub fn case_count(&self) -> usize {
        self.case_count
    }

    /// Number of chunks in the index.
    pub async fn indexed_chunks(&self) -> usize {
        self.retriever.indexed_chunks().await
    }

    /// Answer one symptom description.
    ///
    /// Empty or whitespace-only input is rejected before any outbound call.
    /// The filled prompt (not the raw symptom text) is embedded for the
    /// similarity query, matching how the corpus sentences were indexed as
    /// full prose. The chat call uses deterministic sampling (temperature 0)
    /// and the model's raw text is returned unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] for blank input, and propagates
    /// retrieval or model failures for this request only.
    pub async fn answer(&self, symptoms: &str) -> Result<String> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(EngineError::InvalidInput(
                "symptom description must not be empty".into(),
            ));
        }

        let prompt = build_prompt(symptoms);

        let results = self.retriever.retrieve(&prompt).await?;
        let chunk_texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
        let context = build_context(&chunk_texts);

        info!(
            model = self.chat.name(),
            retrieved = results.len(),
            "requesting medical advice"
        );
        let response = self
            .chat
            .complete(ChatRequest::new(prompt).with_system(context))
            .await
            .map_err(|e| {
                error!(error = %e, "chat completion failed");
                e
            })?;

        Ok(response)
    }
}
