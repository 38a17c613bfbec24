//! Error types for the `symcheck-server` crate.

use thiserror::Error;

/// Errors that can occur during server startup.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A fatal configuration error (e.g. the API key is missing from every
    /// credential source). Surfaces before any query can be served.
    #[error("configuration error: {0}")]
    Config(String),

    /// Constructing the embedding client failed.
    #[error(transparent)]
    Rag(#[from] symcheck_rag::RagError),

    /// Constructing the chat client failed.
    #[error(transparent)]
    Model(#[from] symcheck_model::ModelError),

    /// The corpus build failed.
    #[error(transparent)]
    Engine(#[from] symcheck_engine::EngineError),
}

/// A convenience result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
