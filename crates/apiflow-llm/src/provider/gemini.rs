//! Google Gemini provider implementation

use crate::cache::LLMCache;
use crate::client::{ChatMessage, LLMClient, LLMRequest, LLMResponse, MessagePart, Role};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// API key header; the key never appears in the request URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini provider
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    cache: Option<Arc<dyn LLMCache>>,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache: None,
            client: Client::new(),
        }
    }

    /// Create with cache
    pub fn with_cache(api_key: String, cache: Arc<dyn LLMCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Self::new(api_key)
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every call by a request timeout; an expired call surfaces as
    /// `ApiCallFailed` like any other gateway failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build().map_err(|e| {
            LLMError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(self)
    }

    /// Build the `generateContent` request body
    pub(crate) fn build_body(request: &LLMRequest) -> Value {
        let system_parts: Vec<Value> = request
            .messages
            .iter()
            .filter(|m| m.role == Role::System)
            .flat_map(|m| m.parts.iter().map(part_to_json))
            .collect();

        let contents: Vec<Value> = request
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(message_to_json)
            .collect();

        let mut body = json!({
            "contents": contents,
        });

        if !system_parts.is_empty() {
            body["systemInstruction"] = json!({ "parts": system_parts });
        }

        let mut generation_config = serde_json::Map::new();
        if let Some(max_tokens) = request.max_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if let Some(temperature) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        body
    }

    /// Parse a successful `generateContent` response body
    pub(crate) fn parse_response(model: &str, resp_text: &str) -> Result<LLMResponse> {
        let resp_json: Value = serde_json::from_str(resp_text).map_err(|e| {
            LLMError::ApiCallFailed(format!("Failed to parse response: {}", e))
        })?;

        let candidate = &resp_json["candidates"][0];
        let content: String = candidate["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| LLMError::InvalidResponse("No content in response".to_string()))?;

        let finish_reason = candidate["finishReason"]
            .as_str()
            .unwrap_or("STOP")
            .to_string();

        let tokens_used = resp_json["usageMetadata"]["totalTokenCount"]
            .as_u64()
            .unwrap_or(0) as u32;

        Ok(LLMResponse::new(content, model.to_string())
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason))
    }
}

fn part_to_json(part: &MessagePart) -> Value {
    match part {
        MessagePart::Text(text) => json!({ "text": text }),
        MessagePart::File { data, media_type } => json!({
            "inline_data": {
                "mime_type": media_type,
                "data": STANDARD.encode(data),
            }
        }),
    }
}

fn message_to_json(message: &ChatMessage) -> Value {
    let role = match message.role {
        Role::Assistant => "model",
        Role::User | Role::System => "user",
    };
    json!({
        "role": role,
        "parts": message.parts.iter().map(part_to_json).collect::<Vec<_>>(),
    })
}

#[async_trait]
impl LLMClient for GeminiProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        // Check cache first
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.get(&request).await {
                debug!("Gemini cache hit for model {}", request.model);
                return Ok(cached);
            }
        }

        let body = Self::build_body(&request);

        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let timed_out = e.is_timeout();
                let e = e.without_url();
                if timed_out {
                    LLMError::ApiCallFailed(format!("Gemini API call timed out: {}", e))
                } else {
                    LLMError::ApiCallFailed(format!("Gemini API call failed: {}", e))
                }
            })?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(|e| {
            LLMError::ApiCallFailed(format!("Failed to read response: {}", e.without_url()))
        })?;

        if !status.is_success() {
            return Err(LLMError::ApiCallFailed(format!(
                "Gemini API error ({}): {}",
                status, resp_text
            )));
        }

        let response = Self::parse_response(&request.model, &resp_text)?;

        // Store in cache
        if let Some(ref cache) = self.cache {
            cache.set(&request, response.clone()).await;
        }

        Ok(response)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

impl LLMProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "Gemini"
    }
}
