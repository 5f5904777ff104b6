//! LLM response caching

use crate::client::{LLMRequest, LLMResponse, MessagePart};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Write;
use std::hash::{Hash, Hasher};

/// LLM cache trait
#[async_trait]
pub trait LLMCache: Send + Sync {
    /// Get a cached response
    async fn get(&self, request: &LLMRequest) -> Option<LLMResponse>;

    /// Store a response in cache
    async fn set(&self, request: &LLMRequest, response: LLMResponse);

    /// Clear the cache
    async fn clear(&self);
}

/// In-memory LLM cache implementation
#[derive(Default)]
pub struct InMemoryLLMCache {
    cache: DashMap<String, LLMResponse>,
}

impl InMemoryLLMCache {
    /// Create a new in-memory cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached responses
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache holds no responses
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Generate cache key from request
    ///
    /// File parts contribute their media type, length and a content digest
    /// instead of the raw bytes.
    fn cache_key(request: &LLMRequest) -> String {
        let mut key = format!(
            "{}|{}|{}",
            request.model,
            request.max_tokens.unwrap_or(0),
            request.temperature.unwrap_or(0.0)
        );

        for message in &request.messages {
            let _ = write!(key, "|{:?}:", message.role);
            for part in &message.parts {
                match part {
                    MessagePart::Text(text) => key.push_str(text),
                    MessagePart::File { data, media_type } => {
                        let mut hasher = DefaultHasher::new();
                        data.hash(&mut hasher);
                        let _ = write!(
                            key,
                            "<file {} {} {:x}>",
                            media_type,
                            data.len(),
                            hasher.finish()
                        );
                    }
                }
            }
        }

        key
    }
}

#[async_trait]
impl LLMCache for InMemoryLLMCache {
    async fn get(&self, request: &LLMRequest) -> Option<LLMResponse> {
        let key = Self::cache_key(request);
        self.cache.get(&key).map(|entry| entry.value().clone())
    }

    async fn set(&self, request: &LLMRequest, response: LLMResponse) {
        let key = Self::cache_key(request);
        self.cache.insert(key, response);
    }

    async fn clear(&self) {
        self.cache.clear();
    }
}
