//! Free-form analysis of uploaded documents

use crate::client::{ChatMessage, LLMClient};
use crate::error::Result;
use crate::generator::config::GeneratorConfig;
use crate::generator::prompt_templates::DOCUMENT_ANALYSIS_PROMPT;
use std::sync::Arc;
use tracing::info;

/// Document analyzer using a multimodal LLM
pub struct DocumentAnalyzer {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl DocumentAnalyzer {
    /// Create a new analyzer
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Send the document bytes together with an instruction
    ///
    /// A missing or blank `prompt` falls back to a generic analysis request.
    pub async fn analyze(
        &self,
        prompt: Option<&str>,
        data: Vec<u8>,
        media_type: &str,
    ) -> Result<String> {
        let prompt = prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DOCUMENT_ANALYSIS_PROMPT);

        info!(
            "Analyzing {} byte document ({}) with {}",
            data.len(),
            media_type,
            self.config.model
        );

        let request = self
            .config
            .request(vec![ChatMessage::user_with_file(prompt, data, media_type)]);

        let response = self.client.call(request).await?;
        Ok(response.content)
    }
}
