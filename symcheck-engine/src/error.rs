//! Error types for the `symcheck-engine` crate.

use thiserror::Error;

/// Errors that can occur while building the corpus or answering a query.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The dataset file could not be read or violates the required schema.
    /// Fatal at startup; no partial corpus is served.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// The caller submitted empty or whitespace-only input. Rejected before
    /// any outbound call is made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An error from the retrieval core (embedding or index).
    #[error(transparent)]
    Retrieval(#[from] symcheck_rag::RagError),

    /// An error from the chat-completion model.
    #[error(transparent)]
    Model(#[from] symcheck_model::ModelError),
}

/// A convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
