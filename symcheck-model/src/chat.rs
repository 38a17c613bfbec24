//! Chat-completion model trait.

use async_trait::async_trait;

use crate::error::Result;

/// A single chat-completion request.
///
/// `temperature` defaults to 0.0: the same input should yield the same or
/// near-identical output across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Optional system message carrying instructions and retrieved context.
    pub system: Option<String>,
    /// The user message.
    pub user: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Optional completion length cap.
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a request with deterministic sampling and no system message.
    pub fn new(user: impl Into<String>) -> Self {
        Self { system: None, user: user.into(), temperature: 0.0, max_tokens: None }
    }

    /// Attach a system message.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A hosted chat-completion model.
///
/// Implementations wrap a specific backend behind a unified async interface;
/// [`MockChatModel`](crate::mock::MockChatModel) provides a network-free
/// implementation for tests. Each call is stateless: no conversation memory
/// is kept across calls.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// The model name, for logging.
    fn name(&self) -> &str;

    /// Send one completion request and return the model's raw text response.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}
