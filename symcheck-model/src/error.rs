//! Error types for the `symcheck-model` crate.

use thiserror::Error;

/// Errors that can occur when calling a chat-completion model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The hosted API returned an error or could not be reached.
    #[error("model error ({provider}): {message}")]
    Api {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
