//! Mock LLM provider for testing

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Canned outcome of one mock call
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Successful generation with this text
    Text(String),
    /// Provider failure with this message
    Error(String),
}

impl MockReply {
    /// Successful reply
    pub fn text(content: impl Into<String>) -> Self {
        MockReply::Text(content.into())
    }

    /// Failed reply
    pub fn error(message: impl Into<String>) -> Self {
        MockReply::Error(message.into())
    }
}

type Responder = Box<dyn Fn(&LLMRequest) -> MockReply + Send + Sync>;

enum Behavior {
    Fixed(MockReply),
    Scripted {
        queue: Mutex<VecDeque<MockReply>>,
        fallback: MockReply,
    },
    Responder(Responder),
}

/// Mock LLM provider for testing
///
/// Every request is recorded and can be inspected with [`MockProvider::requests`].
pub struct MockProvider {
    name: String,
    behavior: Behavior,
    requests: Mutex<Vec<LLMRequest>>,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::with_reply(MockReply::text("Mock LLM response"))
    }

    /// Create with custom default response
    pub fn with_response(response: String) -> Self {
        Self::with_reply(MockReply::Text(response))
    }

    /// Create a provider whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::error(message))
    }

    /// Replies are consumed in call order; once exhausted, `fallback` is used
    pub fn scripted(replies: Vec<MockReply>, fallback: MockReply) -> Self {
        Self::from_behavior(Behavior::Scripted {
            queue: Mutex::new(replies.into()),
            fallback,
        })
    }

    /// Compute each reply from the incoming request
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&LLMRequest) -> MockReply + Send + Sync + 'static,
    {
        Self::from_behavior(Behavior::Responder(Box::new(responder)))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self::from_behavior(Behavior::Fixed(reply))
    }

    fn from_behavior(behavior: Behavior) -> Self {
        Self {
            name: "mock".to_string(),
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn next_reply(&self, request: &LLMRequest) -> MockReply {
        match &self.behavior {
            Behavior::Fixed(reply) => reply.clone(),
            Behavior::Scripted { queue, fallback } => queue
                .lock()
                .ok()
                .and_then(|mut q| q.pop_front())
                .unwrap_or_else(|| fallback.clone()),
            Behavior::Responder(responder) => responder(request),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        let reply = self.next_reply(&request);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match reply {
            MockReply::Text(content) => Ok(LLMResponse::new(content, request.model)
                .with_tokens(10)
                .with_finish_reason("stop".to_string())),
            MockReply::Error(message) => Err(LLMError::ApiCallFailed(message)),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LLMProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "Mock"
    }
}
