//! Deluge script generation

use crate::client::{ChatMessage, LLMClient};
use crate::error::Result;
use crate::generator::config::GeneratorConfig;
use crate::generator::prompt_templates::{SCRIPT_PROMPT, SCRIPT_SYSTEM};
use std::sync::Arc;

/// Language used when the caller does not name one
pub const DEFAULT_SCRIPT_LANGUAGE: &str = "Deluge";

/// Script generator using LLM
pub struct ScriptGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl ScriptGenerator {
    /// Create a new script generator
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Generate a complete script for the requirement in `prompt`
    pub async fn generate(&self, prompt: &str, language: Option<&str>) -> Result<String> {
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_SCRIPT_LANGUAGE);

        let request = self.config.request(vec![
            ChatMessage::system(SCRIPT_SYSTEM.replace("{language}", language)),
            ChatMessage::user(SCRIPT_PROMPT.replace("{prompt}", prompt)),
        ]);

        let response = self.client.call(request).await?;
        Ok(response.content)
    }
}
