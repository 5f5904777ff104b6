//! Business use-case summary of a transformed service

use crate::prompts::{USE_CASE_PROMPT, USE_CASE_SYSTEM};
use crate::schema::WorkflowDefinition;
use apiflow_llm::{fill_template, ChatMessage, GeneratorConfig, LLMClient};
use std::sync::Arc;
use tracing::warn;

/// Message used when the gateway cannot produce a summary
pub const DEFAULT_USE_CASE_MESSAGE: &str =
    "This service provides API endpoints for workflow automation.";

pub struct UseCaseSummarizer {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl UseCaseSummarizer {
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// One or two sentences on what `definition` is good for
    ///
    /// Never fails; a gateway error yields [`DEFAULT_USE_CASE_MESSAGE`].
    pub async fn summarize(&self, definition: &WorkflowDefinition) -> String {
        let names = definition
            .endpoints
            .iter()
            .map(|e| e.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let count = definition.endpoints.len().to_string();
        let prompt = fill_template(
            USE_CASE_PROMPT,
            &[
                ("service", definition.service.display_name.as_str()),
                ("count", count.as_str()),
                ("names", names.as_str()),
            ],
        );

        let request = self.config.request(vec![
            ChatMessage::system(USE_CASE_SYSTEM),
            ChatMessage::user(prompt),
        ]);

        match self.client.call(request).await {
            Ok(response) => response.content.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "Use-case summary unavailable, using default message");
                DEFAULT_USE_CASE_MESSAGE.to_string()
            }
        }
    }
}
