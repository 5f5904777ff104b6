//! `<FILL_ME>` code completion

use crate::client::{ChatMessage, LLMClient};
use crate::error::Result;
use crate::generator::config::GeneratorConfig;
use crate::generator::prompt_templates::CODE_REWRITE_SYSTEM;
use std::sync::Arc;

/// Code rewrite generator using LLM
pub struct CodeRewriteGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl CodeRewriteGenerator {
    /// Create a new rewrite generator
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Ask the model for the code that replaces the `<FILL_ME>` hole placed
    /// between `code` and `instructions`
    pub async fn generate(&self, code: &str, instructions: &str, language: &str) -> Result<String> {
        let language = language.trim();
        let language_prefix = if language.is_empty() {
            String::new()
        } else {
            format!("{} ", language)
        };
        let system = CODE_REWRITE_SYSTEM.replace("{language}", &language_prefix);
        let user_prompt = format!("{}<FILL_ME>{}", code, instructions);

        let request = self.config.request(vec![
            ChatMessage::system(system),
            ChatMessage::user(user_prompt),
        ]);

        let response = self.client.call(request).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;

    #[tokio::test]
    async fn test_language_in_system_message() {
        let provider = Arc::new(MockProvider::with_response("return a + b;".to_string()));
        let generator = CodeRewriteGenerator::with_defaults(provider.clone());

        let code = generator
            .generate("fn add(a: i32, b: i32) -> i32 {", "}", "Rust")
            .await
            .unwrap();
        assert_eq!(code, "return a + b;");

        let request = &provider.requests()[0];
        assert!(request
            .system_text()
            .unwrap()
            .starts_with("You are a Rust programmer that replaces <FILL_ME>"));
        assert_eq!(
            request.user_text().unwrap(),
            "fn add(a: i32, b: i32) -> i32 {<FILL_ME>}"
        );
    }

    #[tokio::test]
    async fn test_empty_language() {
        let provider = Arc::new(MockProvider::new());
        let generator = CodeRewriteGenerator::with_defaults(provider.clone());

        generator.generate("x = ", "", "").await.unwrap();

        let system = provider.requests()[0].system_text().unwrap();
        assert!(system.starts_with("You are a programmer that replaces"));
    }
}
