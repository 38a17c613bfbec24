//! Mock chat model for testing without network access.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::chat::{ChatModel, ChatRequest};
use crate::error::{ModelError, Result};

/// A [`ChatModel`] that returns a canned response and counts calls.
///
/// `fail_next` makes the following call return an API error, which lets
/// tests exercise the request-local failure path (the failure must not
/// poison subsequent calls).
pub struct MockChatModel {
    response: String,
    calls: AtomicUsize,
    fail_next: Mutex<bool>,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockChatModel {
    /// Create a mock that always answers with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
            fail_next: Mutex::new(false),
            last_request: Mutex::new(None),
        }
    }

    /// Make the next `complete` call fail with an API error.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Number of `complete` calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(ModelError::Api {
                provider: "mock".into(),
                message: "simulated upstream failure".into(),
            });
        }
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fail_next_applies_to_one_call_only() {
        let mock = MockChatModel::new("ok");
        mock.fail_next();
        assert!(mock.complete(ChatRequest::new("a")).await.is_err());
        assert_eq!(mock.complete(ChatRequest::new("b")).await.unwrap(), "ok");
        assert_eq!(mock.calls(), 2);
    }
}
