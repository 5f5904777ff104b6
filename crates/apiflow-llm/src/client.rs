//! LLM client interface and types

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions fixing the assistant's persona
    System,
    /// End-user content
    User,
    /// Previous model output
    Assistant,
}

/// One piece of message content
#[derive(Clone, PartialEq)]
pub enum MessagePart {
    /// Plain text
    Text(String),
    /// Binary attachment sent inline with the request
    File { data: Vec<u8>, media_type: String },
}

impl fmt::Debug for MessagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessagePart::Text(text) => f.debug_tuple("Text").field(text).finish(),
            MessagePart::File { data, media_type } => f
                .debug_struct("File")
                .field("media_type", media_type)
                .field("len", &data.len())
                .finish(),
        }
    }
}

/// A role-tagged message
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            parts: vec![MessagePart::Text(content.into())],
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![MessagePart::Text(content.into())],
        }
    }

    /// Create a user message carrying a text part followed by a file part
    pub fn user_with_file(
        content: impl Into<String>,
        data: Vec<u8>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::User,
            parts: vec![
                MessagePart::Text(content.into()),
                MessagePart::File {
                    data,
                    media_type: media_type.into(),
                },
            ],
        }
    }

    /// Concatenated text parts of this message
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text(text) => Some(text.as_str()),
                MessagePart::File { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Request to an LLM
#[derive(Debug, Clone, PartialEq)]
pub struct LLMRequest {
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,

    /// Ordered, role-tagged conversation
    pub messages: Vec<ChatMessage>,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Temperature for sampling (0.0 - 1.0)
    pub temperature: Option<f32>,
}

impl LLMRequest {
    /// Create a new LLM request
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Text of the first system message, if any
    pub fn system_text(&self) -> Option<String> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(ChatMessage::text)
    }

    /// Text of the last user message, if any
    pub fn user_text(&self) -> Option<String> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(ChatMessage::text)
    }
}

/// Response from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Number of tokens used
    pub tokens_used: u32,

    /// Finish reason (e.g., "STOP", "MAX_TOKENS")
    pub finish_reason: String,
}

impl LLMResponse {
    /// Create a new LLM response
    pub fn new(content: String, model: String) -> Self {
        Self {
            content,
            model,
            tokens_used: 0,
            finish_reason: "stop".to_string(),
        }
    }

    /// Set tokens used
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens_used = tokens;
        self
    }

    /// Set finish reason
    pub fn with_finish_reason(mut self, reason: String) -> Self {
        self.finish_reason = reason;
        self
    }
}

/// Async LLM client trait
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Call the LLM with a request for text generation
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse>;

    /// Get the name of this client
    fn name(&self) -> &str;
}
