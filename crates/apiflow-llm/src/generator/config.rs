//! Shared generator configuration

use crate::client::{ChatMessage, LLMRequest};

/// Default model for every generation call
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration shared by all generators
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Model to use for generation (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Maximum tokens for response
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 1.0, lower = more deterministic)
    pub temperature: Option<f32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build a request for `messages` using this configuration
    pub fn request(&self, messages: Vec<ChatMessage>) -> LLMRequest {
        LLMRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let config = GeneratorConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_request_carries_settings() {
        let config = GeneratorConfig::new("gemini-2.0-pro")
            .with_max_tokens(512)
            .with_temperature(0.2);

        let request = config.request(vec![ChatMessage::user("x")]);

        assert_eq!(request.model, "gemini-2.0-pro");
        assert_eq!(request.max_tokens, Some(512));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.messages.len(), 1);
    }
}
