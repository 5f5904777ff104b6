//! JSON-to-XML mapping generation

use crate::client::{ChatMessage, LLMClient};
use crate::error::Result;
use crate::generator::config::GeneratorConfig;
use crate::generator::prompt_templates::{fill_template, XML_MAPPING_PROMPT, XML_MAPPING_RULES};
use std::sync::Arc;

/// JSON-to-XML mapping generator using LLM
pub struct XmlMappingGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl XmlMappingGenerator {
    /// Create a new mapping generator
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Generate an XML mapping snippet for the JSON described in `prompt`
    ///
    /// `system_prompt` is forwarded as the system message when present.
    /// The returned text is the raw model output (intro line plus fenced
    /// ```` ```xml ```` block).
    pub async fn generate(&self, system_prompt: Option<&str>, prompt: &str) -> Result<String> {
        let user_prompt = fill_template(
            XML_MAPPING_PROMPT,
            &[("rules", XML_MAPPING_RULES), ("prompt", prompt)],
        );

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt.filter(|s| !s.trim().is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(user_prompt));

        let response = self.client.call(self.config.request(messages)).await?;
        Ok(response.content)
    }
}
