//! # symcheck-model
//!
//! Chat-completion integrations for symcheck.
//!
//! Provides the [`ChatModel`] trait, an OpenAI-backed implementation
//! ([`OpenAIChatModel`]), and a [`MockChatModel`] for tests. The symptom
//! checker issues exactly one non-streaming completion per request, with
//! deterministic sampling (temperature 0).

pub mod chat;
pub mod error;
pub mod mock;
pub mod openai;

pub use chat::{ChatModel, ChatRequest};
pub use error::{ModelError, Result};
pub use mock::MockChatModel;
pub use openai::{DEFAULT_CHAT_MODEL, OpenAIChatModel};
